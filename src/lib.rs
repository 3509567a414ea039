//! Interactive 3D viewers for skeletal motion capture data.
//!
//! The core is display-free: [`parse`] loads a `.bvh` file into a
//! [`types::Motion`] with fully resolved global joint positions,
//! [`bounds`] computes padded axis extents for stable camera framing, and
//! [`render`] turns one frame into plain draw commands (points and bone
//! segments). The `visualize` feature adds the Bevy viewers on top, plus the
//! `view_motion` and `compare_motions` binaries.

pub mod bounds;
pub mod logging;
pub mod parse;
pub mod playback;
pub mod render;
pub mod types;

#[cfg(feature = "visualize")]
pub mod compare;
#[cfg(feature = "visualize")]
pub mod visualize;
