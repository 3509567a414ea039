use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

use crate::bounds::Bounds;
use crate::playback::Playback;
use crate::render::{plot_frame, FramePlot};
use crate::types::{Motion, Position};

///////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Resource)]
struct ViewerData {
    motion: Motion,
    bounds: Bounds,
    playback: Playback,
    scale: f32,
}

/// Marks the HUD text showing the current frame.
#[derive(Component)]
pub(crate) struct HudText;

/// Open an interactive window scrubbing through one motion.
///
/// `scale` converts the motion's world units to meters (e.g. 0.01 for
/// centimeter data).
pub fn view_motion(motion: Motion, scale: f32) {
    let bounds = Bounds::of_motion(&motion);
    let playback = Playback::new(motion.num_frames());

    App::new()
        .insert_resource(ViewerData {
            motion,
            bounds,
            playback,
            scale,
        })
        .add_plugins(DefaultPlugins)
        .add_plugins(PanOrbitCameraPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_input, draw_pose, update_hud))
        .run();
}

///////////////////////////////////////////////////////////////////////////////////////////////////

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    data: Res<ViewerData>,
) {
    let focus = to_vec3(&data.bounds.center(), Position::new(0.0, 0.0, 0.0), data.scale);
    spawn_stage(&mut commands, &mut meshes, &mut materials, focus);

    // instructions
    commands.spawn(
        TextBundle::from_section(
            "Left/Right or mouse wheel: step one frame\n\
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

    // frame counter
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
    mut data: ResMut<ViewerData>,
) {
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        data.playback.step_forward();
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        data.playback.step_backward();
    }
    for event in wheel.read() {
        if event.y > 0.0 {
            data.playback.step_forward();
        } else if event.y < 0.0 {
            data.playback.step_backward();
        }
    }
}

fn draw_pose(mut gizmos: Gizmos, data: Res<ViewerData>) {
    let plot = plot_frame(&data.motion, data.playback.frame());
    let origin = Position::new(0.0, 0.0, 0.0);
    draw_plot(&mut gizmos, &plot, origin, data.scale, Color::YELLOW);
    draw_bounds_box(&mut gizmos, &data.bounds, origin, data.scale);
}

fn update_hud(mut query: Query<&mut Text, With<HudText>>, data: Res<ViewerData>) {
    for mut text in &mut query {
        text.sections[0].value = format!(
            "Frame {} / {}",
            data.playback.frame(),
            data.playback.num_frames()
        );
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
// Draw helpers shared with the comparison viewer.

pub(crate) fn to_vec3(pos: &Position, offset: Position, scale: f32) -> Vec3 {
    let p = pos + offset;
    Vec3::new(p.x as f32, p.y as f32, p.z as f32) * scale
}

/// Emit one frame plot as gizmos: a line per bone, a small sphere per joint.
pub(crate) fn draw_plot(
    gizmos: &mut Gizmos,
    plot: &FramePlot,
    offset: Position,
    scale: f32,
    color: Color,
) {
    for (from, to) in &plot.segments {
        gizmos.line(
            to_vec3(from, offset, scale),
            to_vec3(to, offset, scale),
            color,
        );
    }
    for point in &plot.points {
        gizmos.sphere(to_vec3(point, offset, scale), Quat::IDENTITY, 0.02, color);
    }
}

/// Wireframe box around the motion's padded bounds, so the stable camera
/// frame is visible while scrubbing.
pub(crate) fn draw_bounds_box(gizmos: &mut Gizmos, bounds: &Bounds, offset: Position, scale: f32) {
    let center = to_vec3(&bounds.center(), offset, scale);
    let size = Vec3::new(
        bounds.x.size() as f32,
        bounds.y.size() as f32,
        bounds.z.size() as f32,
    ) * scale;
    gizmos.cuboid(
        Transform::from_translation(center).with_scale(size),
        Color::rgba(1.0, 1.0, 1.0, 0.25),
    );
}

/// Orbit camera looking at the motion bounds, plus a ground plane.
pub(crate) fn spawn_stage(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    focus: Vec3,
) {
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(focus + Vec3::new(0., 1.5, 6.))
                .looking_at(focus, Vec3::Y),
            ..default()
        },
        PanOrbitCamera {
            focus,
            ..default()
        },
    ));

    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(10.0, 10.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::rgba(1., 1., 1., 0.5),
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        }),
        transform: Transform::from_translation(Vec3::new(focus.x, 0.0, focus.z)),
        ..default()
    });
}
