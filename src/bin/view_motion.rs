//! Single-motion viewer: load one `.bvh` file and scrub through its frames.

use skelview::bounds::Bounds;
use skelview::parse::{load_motion_from_file, LoadError};
use skelview::types::Motion;

fn main() {
    skelview::logging::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        log::error!("usage: view_motion <motion.bvh> [scale]");
        return;
    };
    let scale = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(1.0);

    // Every failure is terminal for the invocation; report and return.
    // A missing file gets its specific message, anything else the full
    // debug detail.
    if let Err(err) = run(&path, scale) {
        match &err {
            LoadError::NotFound(_) => log::error!("{err}"),
            _ => log::error!("{err:?}"),
        }
    }
}

fn run(path: &str, scale: f32) -> Result<(), LoadError> {
    log::info!("loading motion file {path}");
    let motion = load_motion_from_file(path)?;
    describe(&motion);
    log::info!("use the arrow keys or mouse wheel to browse frames, close the window to exit");

    skelview::visualize::view_motion(motion, scale);
    Ok(())
}

fn describe(motion: &Motion) {
    let bounds = Bounds::of_motion(motion);
    log::info!("motion loaded");
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
