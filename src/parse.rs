use crate::types::{Index, Joint, Motion, Position, Skeleton};
use cgmath::{One, Quaternion, Rad, Rotation, Rotation3, Vector3, Zero};
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

///////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("motion file not found: {0}")]
    NotFound(PathBuf),

    #[error("i/o error reading motion file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed motion file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("motion file contains no frames")]
    Empty,
}

fn malformed(line: usize, reason: impl Into<String>) -> LoadError {
    LoadError::Malformed {
        line: line + 1, // 1-based for humans
        reason: reason.into(),
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////

/// One animated degree of freedom of a joint, in file column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Xposition,
    Yposition,
    Zposition,
    Xrotation,
    Yrotation,
    Zrotation,
}

impl Channel {
    fn from_name(name: &str) -> Option<Channel> {
        match name {
            "Xposition" => Some(Channel::Xposition),
            "Yposition" => Some(Channel::Yposition),
            "Zposition" => Some(Channel::Zposition),
            "Xrotation" => Some(Channel::Xrotation),
            "Yrotation" => Some(Channel::Yrotation),
            "Zrotation" => Some(Channel::Zrotation),
            _ => None,
        }
    }

    fn rotation_axis(self) -> Option<Vector3<f64>> {
        match self {
            Channel::Xrotation => Some(Vector3::unit_x()),
            Channel::Yrotation => Some(Vector3::unit_y()),
            Channel::Zrotation => Some(Vector3::unit_z()),
            _ => None,
        }
    }
}

/// Parsed HIERARCHY section: the skeleton plus each joint's channel layout
/// (channel kinds in declared order, with their columns in a motion row).
struct Hierarchy {
    skeleton: Skeleton,
    channels: Vec<Vec<(Channel, usize)>>,
    total_channels: usize,
}

///////////////////////////////////////////////////////////////////////////////////////////////////

/// Load a motion from a `.bvh` file.
///
/// The path is checked for existence up front so a missing file gets its own
/// specific error before any read is attempted.
pub fn load_motion_from_file(path: impl AsRef<Path>) -> Result<Motion, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    load_motion_from_str(&contents)
}

/// Load a motion from BVH text.
pub fn load_motion_from_str(text: &str) -> Result<Motion, LoadError> {
    let mut lines = text.lines().enumerate();

    let hierarchy = parse_hierarchy(&mut lines)?;
    let (num_frames, frame_time) = parse_motion_header(&mut lines)?;

    let mut positions: Vec<Vec<Position>> = Vec::with_capacity(num_frames);
    for (line_no, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = parse_row(line_no, line, hierarchy.total_channels)?;
        positions.push(resolve_frame(&hierarchy, &row));
    }

    // The viewers draw a frame every tick; a motion with no frames has
    // nothing to draw and must fail the load, not crash the event loop.
    if positions.is_empty() {
        return Err(LoadError::Empty);
    }
    if positions.len() != num_frames {
        log::warn!(
            "motion declares {} frames but contains {}; using the actual count",
            num_frames,
            positions.len()
        );
    }

    Ok(Motion {
        skeleton: hierarchy.skeleton,
        positions,
        fps: 1.0 / frame_time,
        frame_time,
    })
}

///////////////////////////////////////////////////////////////////////////////////////////////////

fn parse_hierarchy<'a, I>(lines: &mut I) -> Result<Hierarchy, LoadError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let re_joint = Regex::new(r"^(ROOT|JOINT)\s+(\S+)").unwrap();

    let mut joints: Vec<Joint> = Vec::new();
    let mut channels: Vec<Vec<(Channel, usize)>> = Vec::new();
    let mut total_channels = 0usize;

    // Open joints, innermost last. A freshly declared joint's parent is the
    // joint whose braces we are currently inside.
    let mut stack: Vec<Index> = Vec::new();
    let mut in_endsite = false;

    for (line_no, raw) in lines {
        let line = raw.trim();

        if line.is_empty() || line.starts_with("HIERARCHY") {
            continue;
        } else if let Some(caps) = re_joint.captures(line) {
            let name = caps[2].to_string();
            joints.push(Joint {
                name,
                index: joints.len(),
                parent: stack.last().copied(),
                offset: Position::zero(),
            });
            channels.push(Vec::new());
        } else if line.to_lowercase().starts_with("end") {
            in_endsite = true;
        } else if line == "{" {
            if !in_endsite {
                match joints.len().checked_sub(1) {
                    Some(last) => stack.push(last),
                    None => return Err(malformed(line_no, "'{' before any joint declaration")),
                }
            }
        } else if line == "}" {
            if in_endsite {
                in_endsite = false;
            } else if stack.pop().is_none() {
                return Err(malformed(line_no, "unbalanced '}'"));
            }
        } else if let Some(rest) = line.strip_prefix("OFFSET") {
            // End-site offsets only describe leaf bone tails; the viewer
            // draws joint heads, so they are skipped.
            if in_endsite {
                continue;
            }
            let offset = parse_vec3(line_no, rest)?;
            match joints.last_mut() {
                Some(joint) => joint.offset = offset,
                None => return Err(malformed(line_no, "OFFSET before any joint declaration")),
            }
        } else if let Some(rest) = line.strip_prefix("CHANNELS") {
            let joint_channels = channels
                .last_mut()
                .ok_or_else(|| malformed(line_no, "CHANNELS before any joint declaration"))?;
            for name in rest.split_whitespace().skip(1) {
                let channel = Channel::from_name(name)
                    .ok_or_else(|| malformed(line_no, format!("unknown channel '{name}'")))?;
                joint_channels.push((channel, total_channels));
                total_channels += 1;
            }
        } else if line.starts_with("MOTION") {
            if joints.is_empty() {
                return Err(malformed(line_no, "MOTION section before any joint"));
            }
            if !stack.is_empty() {
                return Err(malformed(line_no, "MOTION section inside an unclosed joint"));
            }
            return Ok(Hierarchy {
                skeleton: Skeleton { joints },
                channels,
                total_channels,
            });
        } else {
            return Err(malformed(line_no, format!("unexpected token '{line}'")));
        }
    }

    Err(malformed(0, "no MOTION section"))
}

/// Parse `Frames:` and `Frame Time:`; motion rows follow in the iterator.
fn parse_motion_header<'a, I>(lines: &mut I) -> Result<(usize, f64), LoadError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut num_frames = None;
    let mut frame_time = None;

    for (line_no, raw) in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        } else if let Some(rest) = line.strip_prefix("Frames:") {
            num_frames = Some(
                rest.trim()
                    .parse::<usize>()
                    .map_err(|_| malformed(line_no, "bad frame count"))?,
            );
        } else if let Some(rest) = line.strip_prefix("Frame Time:") {
            let ft = rest
                .trim()
                .parse::<f64>()
                .map_err(|_| malformed(line_no, "bad frame time"))?;
            if ft <= 0.0 {
                return Err(malformed(line_no, "frame time must be positive"));
            }
            frame_time = Some(ft);
            break; // motion rows follow
        } else {
            return Err(malformed(line_no, format!("unexpected token '{line}'")));
        }
    }

    match (num_frames, frame_time) {
        (Some(n), Some(ft)) => Ok((n, ft)),
        _ => Err(malformed(0, "missing Frames / Frame Time header")),
    }
}

fn parse_row(line_no: usize, line: &str, expected: usize) -> Result<Vec<f64>, LoadError> {
    let row: Vec<f64> = line
        .split_whitespace()
        .map(|s| s.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed(line_no, "non-numeric motion value"))?;
    if row.len() != expected {
        return Err(malformed(
            line_no,
            format!("motion row has {} values, expected {}", row.len(), expected),
        ));
    }
    Ok(row)
}

fn parse_vec3(line_no: usize, rest: &str) -> Result<Position, LoadError> {
    let parts: Vec<f64> = rest
        .split_whitespace()
        .map(|s| s.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed(line_no, "non-numeric offset"))?;
    if parts.len() != 3 {
        return Err(malformed(line_no, "OFFSET needs exactly 3 values"));
    }
    Ok(Position::new(parts[0], parts[1], parts[2]))
}

///////////////////////////////////////////////////////////////////////////////////////////////////

/// Resolve one motion row into global joint positions (forward kinematics).
/// BVH declares parents before children, so a single pass in index order is
/// enough.
fn resolve_frame(hierarchy: &Hierarchy, row: &[f64]) -> Vec<Position> {
    let joints = &hierarchy.skeleton.joints;
    let mut global_pos = vec![Position::zero(); joints.len()];
    let mut global_rot = vec![Quaternion::<f64>::one(); joints.len()];

    for joint in joints {
        let mut local_pos = joint.offset;
        let mut local_rot = Quaternion::<f64>::one();

        // Channel values apply in declared order: translations add to the
        // rest offset, rotations compose left to right (degrees).
        for &(channel, column) in &hierarchy.channels[joint.index] {
            let value = row[column];
            match channel {
                Channel::Xposition => local_pos.x += value,
                Channel::Yposition => local_pos.y += value,
                Channel::Zposition => local_pos.z += value,
                _ => {
                    let axis = channel.rotation_axis().unwrap_or_else(Vector3::unit_y);
                    local_rot = local_rot
                        * Quaternion::from_axis_angle(axis, Rad(value.to_radians()));
                }
            }
        }

        match joint.parent {
            Some(p) => {
                global_rot[joint.index] = global_rot[p] * local_rot;
                global_pos[joint.index] = global_pos[p] + global_rot[p].rotate_vector(local_pos);
            }
            None => {
                global_rot[joint.index] = local_rot;
                global_pos[joint.index] = local_pos;
            }
        }
    }

    global_pos
}

///////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    const TWO_JOINT_BVH: &str = "\
HIERARCHY
ROOT hips
{
    OFFSET 0 0 0
    CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation
    JOINT spine
    {
        OFFSET 0 1 0
        CHANNELS 3 Zrotation Xrotation Yrotation
        End Site
        {
            OFFSET 0 0.5 0
        }
    }
}
MOTION
Frames: 2
Frame Time: 0.033333333
0 0 0 0 0 0 0 0 0
1 2 3 90 0 0 0 0 0
";

    #[test]
    fn parses_hierarchy_and_header() {
        let motion = load_motion_from_str(TWO_JOINT_BVH).unwrap();
        assert_eq!(motion.num_frames(), 2);
        assert_eq!(motion.num_joints(), 2);
        assert!((motion.fps - 30.0).abs() < 1e-3);

        let skel = &motion.skeleton;
        assert_eq!(skel.index_of("hips"), Some(0));
        assert_eq!(skel.index_of("spine"), Some(1));
        assert_eq!(skel.parent_of(1), Some(0));
        assert!(skel.joints[0].parent.is_none());
    }

    #[test]
    fn forward_kinematics_places_children() {
        let motion = load_motion_from_str(TWO_JOINT_BVH).unwrap();

        // Rest frame: spine sits at its offset above the root.
        let frame0 = motion.frame(0);
        assert!((frame0[1] - Position::new(0.0, 1.0, 0.0)).magnitude() < 1e-9);

        // Frame 1: root translated to (1,2,3) and rotated 90 deg about Z,
        // which carries the spine offset (0,1,0) to (-1,0,0).
        let frame1 = motion.frame(1);
        assert!((frame1[0] - Position::new(1.0, 2.0, 3.0)).magnitude() < 1e-9);
        assert!((frame1[1] - Position::new(0.0, 2.0, 3.0)).magnitude() < 1e-9);
    }

    #[test]
    fn missing_file_is_reported_before_any_read() {
        let err = load_motion_from_file("/no/such/motion.bvh").unwrap_err();
        match err {
            LoadError::NotFound(path) => {
                assert_eq!(path, PathBuf::from("/no/such/motion.bvh"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn zero_frame_motion_is_rejected() {
        let empty = TWO_JOINT_BVH
            .replace("Frames: 2", "Frames: 0")
            .replace("0 0 0 0 0 0 0 0 0\n", "")
            .replace("1 2 3 90 0 0 0 0 0\n", "");
        let err = load_motion_from_str(&empty).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn declared_frames_without_rows_are_rejected() {
        // Header promises frames but no motion rows follow; the load must
        // fail rather than hand an undrawable motion to a viewer.
        let headless = TWO_JOINT_BVH
            .replace("0 0 0 0 0 0 0 0 0\n", "")
            .replace("1 2 3 90 0 0 0 0 0\n", "");
        let err = load_motion_from_str(&headless).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn errors_expose_debug_detail() {
        // The binaries log the debug form on generic failures; it has to
        // carry the variant and its fields.
        let err = load_motion_from_str("HIERARCHY\nMOTION\n").unwrap_err();
        let detail = format!("{err:?}");
        assert!(detail.contains("Malformed"));
        assert!(detail.contains("line"));
    }

    #[test]
    fn malformed_row_is_rejected_with_line_number() {
        let broken = TWO_JOINT_BVH.replace("1 2 3 90 0 0 0 0 0", "1 2 3");
        let err = load_motion_from_str(&broken).unwrap_err();
        match err {
            LoadError::Malformed { line, .. } => assert_eq!(line, 20),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }
}
