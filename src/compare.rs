use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

use crate::bounds::Bounds;
use crate::playback::Playback;
use crate::render::plot_frame;
use crate::types::{Motion, Position};
use crate::visualize::{draw_bounds_box, draw_plot, spawn_stage, to_vec3, HudText};

///////////////////////////////////////////////////////////////////////////////////////////////////

const SOURCE_COLOR: Color = Color::RED;
const TARGET_COLOR: Color = Color::BLUE;

/// Step applied to the speed multiplier per Up/Down key press.
const SPEED_STEP: f64 = 0.1;

#[derive(Debug, Resource)]
struct CompareData {
    source: Motion,
    target: Motion,
    source_bounds: Bounds,
    target_bounds: Bounds,
    /// World-space shift applied to the target so it sits beside the source.
    target_offset: Position,
    playback: Playback,
    scale: f32,
}

/// Open an interactive window playing two motions side by side.
///
/// Both motions follow one shared frame cursor that wraps at the shorter
/// motion's frame count, so they stay in sync for their whole overlap.
pub fn compare_motions(source: Motion, target: Motion, scale: f32) {
    let source_bounds = Bounds::of_motion(&source);
    let target_bounds = Bounds::of_motion(&target);

    // Park the target just past the source's padded extent, with a gap
    // proportional to the combined widths (fixed gap for degenerate data).
    let widths = source_bounds.x.size() + target_bounds.x.size();
    let gap = if widths > 0.0 { widths * 0.1 } else { 1.0 };
    let target_offset = Position::new(
        source_bounds.x.max + gap - target_bounds.x.min,
        0.0,
        0.0,
    );

    let playback = Playback::synced(source.num_frames(), target.num_frames());

    App::new()
        .insert_resource(CompareData {
            source,
            target,
            source_bounds,
            target_bounds,
            target_offset,
            playback,
            scale,
        })
        .add_plugins(DefaultPlugins)
        .add_plugins(PanOrbitCameraPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_input, advance_playback, draw_poses, update_hud))
        .run();
}

///////////////////////////////////////////////////////////////////////////////////////////////////

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    data: Res<CompareData>,
) {
    // Look at the midpoint between the two framed motions.
    let origin = Position::new(0.0, 0.0, 0.0);
    let source_center = to_vec3(&data.source_bounds.center(), origin, data.scale);
    let target_center = to_vec3(&data.target_bounds.center(), data.target_offset, data.scale);
    let focus = (source_center + target_center) * 0.5;
    spawn_stage(&mut commands, &mut meshes, &mut materials, focus);

    // instructions
    commands.spawn(
        TextBundle::from_section(
            "Space: play/pause\n\
            Left/Right or mouse wheel: step one frame\n\
            Up/Down: playback speed (0.1x - 2.0x)\n\
            Close the window to exit\n",
            TextStyle {
                font_size: 15.,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
    );

    // frame / playback state
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 17.,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
        HudText,
    ));
}

fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut wheel: EventReader<MouseWheel>,
    mut data: ResMut<CompareData>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        data.playback.toggle();
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        data.playback.step_forward();
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        data.playback.step_backward();
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        data.playback.nudge_speed(SPEED_STEP);
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        data.playback.nudge_speed(-SPEED_STEP);
    }
    for event in wheel.read() {
        if event.y > 0.0 {
            data.playback.step_forward();
        } else if event.y < 0.0 {
            data.playback.step_backward();
        }
    }
}

/// Playback interval derives from the source motion's frame rate, as the
/// two motions share one cursor.
fn advance_playback(time: Res<Time>, mut data: ResMut<CompareData>) {
    let fps = data.source.fps;
    data.playback.advance(time.delta_seconds_f64(), fps);
}

fn draw_poses(mut gizmos: Gizmos, data: Res<CompareData>) {
    let frame = data.playback.frame();
    let origin = Position::new(0.0, 0.0, 0.0);
    let scale = data.scale;

    let source_plot = plot_frame(&data.source, frame);
    draw_plot(&mut gizmos, &source_plot, origin, scale, SOURCE_COLOR);
    draw_bounds_box(&mut gizmos, &data.source_bounds, origin, scale);

    let target_plot = plot_frame(&data.target, frame);
    draw_plot(&mut gizmos, &target_plot, data.target_offset, scale, TARGET_COLOR);
    draw_bounds_box(&mut gizmos, &data.target_bounds, data.target_offset, scale);
}

fn update_hud(mut query: Query<&mut Text, With<HudText>>, data: Res<CompareData>) {
    let state = if data.playback.is_playing() {
        "playing"
    } else {
        "paused"
    };
    for mut text in &mut query {
        text.sections[0].value = format!(
            "Frame {} / {}  |  {}  |  speed {:.1}x",
            data.playback.frame(),
            data.playback.num_frames(),
            state,
            data.playback.speed()
        );
    }
}
