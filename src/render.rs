use crate::types::{Motion, Position};

/// Draw commands for one frame of a motion: a point per joint and a line
/// segment from each non-root joint's parent to the joint itself.
///
/// This is deliberately display-free so poses can be inspected and tested
/// without a window; the viewer layer turns it into gizmo calls.
#[derive(Debug, Clone)]
pub struct FramePlot {
    pub points: Vec<Position>,
    /// `(parent position, joint position)` pairs, in joint index order.
    pub segments: Vec<(Position, Position)>,
}

/// Plot one frame of a motion.
///
/// The frame index must be valid for the motion; that is the caller's
/// contract, same as indexing into the motion directly.
pub fn plot_frame(motion: &Motion, frame: usize) -> FramePlot {
    let positions = motion.frame(frame);

    let segments = motion
        .skeleton
        .joints
        .iter()
        .filter_map(|joint| {
            joint
                .parent
                .map(|parent| (positions[parent], positions[joint.index]))
        })
        .collect();

    FramePlot {
        points: positions.to_vec(),
        segments,
    }
}
