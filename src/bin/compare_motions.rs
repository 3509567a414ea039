//! Comparison viewer: play two `.bvh` files side by side in sync.

use skelview::bounds::Bounds;
use skelview::parse::{load_motion_from_file, LoadError};
use skelview::types::Motion;

fn main() {
    skelview::logging::init();

    let mut args = std::env::args().skip(1);
    let (Some(source_path), Some(target_path)) = (args.next(), args.next()) else {
        log::error!("usage: compare_motions <source.bvh> <target.bvh> [scale]");
        return;
    };
    let scale = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(1.0);

    // Missing files get their specific message, anything else the full
    // debug detail.
    if let Err(err) = run(&source_path, &target_path, scale) {
        match &err {
            LoadError::NotFound(_) => log::error!("{err}"),
            _ => log::error!("{err:?}"),
        }
    }
}

fn run(source_path: &str, target_path: &str, scale: f32) -> Result<(), LoadError> {
    log::info!("loading motion files");
    let source = load_motion_from_file(source_path)?;
    let target = load_motion_from_file(target_path)?;

    describe("source", &source);
    describe("target", &target);
    if !source.skeleton.same_layout(&target.skeleton) {
        log::warn!(
            "source and target skeletons differ; motions are shown side by side \
            without joint-level correspondence"
        );
    }
    log::info!("controls:");
    log::info!("- play/pause: space");
    log::info!("- next/previous frame: right/left arrow keys or mouse wheel");
    log::info!("- playback speed: up/down arrow keys (0.1x - 2.0x)");
    log::info!("- close the window to exit");

    skelview::compare::compare_motions(source, target, scale);
    Ok(())
}

fn describe(label: &str, motion: &Motion) {
    let bounds = Bounds::of_motion(motion);
    log::info!("{label} motion:");
    log::info!("- frames: {}", motion.num_frames());
    log::info!("- fps: {:.1}", motion.fps);
    log::info!("- joints: {}", motion.num_joints());
    log::info!(
        "- bounds: x [{:.2}, {:.2}], y [{:.2}, {:.2}], z [{:.2}, {:.2}]",
        bounds.x.min,
        bounds.x.max,
        bounds.y.min,
        bounds.y.max,
        bounds.z.min,
        bounds.z.max
    );
}
