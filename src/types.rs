use cgmath::Vector3;

pub type Index = usize;
pub type Position = Vector3<f64>;

/////////////////////////////////////////////////////////////////////////////////////////////////

/// One joint of a skeleton hierarchy.
#[derive(Debug, Clone)]
pub struct Joint {
    pub name: String,
    pub index: Index,
    /// `None` marks the root joint. Every other joint has exactly one parent.
    pub parent: Option<Index>,
    /// Rest offset from the parent (world units).
    pub offset: Position,
}

/// A named hierarchy of joints. Indices are dense and 0-based; the root is
/// the single joint whose `parent` is `None`.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    pub joints: Vec<Joint>,
}

impl Skeleton {
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Look up a joint index by name.
    pub fn index_of(&self, name: &str) -> Option<Index> {
        self.joints.iter().position(|j| j.name == name)
    }

    pub fn parent_of(&self, index: Index) -> Option<Index> {
        self.joints[index].parent
    }

    /// The root joint (no parent).
    pub fn root(&self) -> Option<&Joint> {
        self.joints.iter().find(|j| j.parent.is_none())
    }

    /// Whether another skeleton has the same joint names at the same
    /// indices. Motions with differing layouts can still be viewed side by
    /// side, but there is no joint-level correspondence between them.
    pub fn same_layout(&self, other: &Skeleton) -> bool {
        self.len() == other.len()
            && self
                .joints
                .iter()
                .all(|j| other.index_of(&j.name) == Some(j.index))
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// A time-sequence of skeletal poses with a frame rate.
///
/// `positions[frame][joint]` is the world position of a joint at a frame;
/// the joint count is the same for every frame. The viewer core only reads
/// this data, it never mutates a loaded motion.
#[derive(Debug, Clone)]
pub struct Motion {
    pub skeleton: Skeleton,
    /// Global joint positions, indexed `[frame][joint]`.
    pub positions: Vec<Vec<Position>>,
    pub fps: f64,
    pub frame_time: f64,
}

impl Motion {
    pub fn num_frames(&self) -> usize {
        self.positions.len()
    }

    pub fn num_joints(&self) -> usize {
        self.skeleton.len()
    }

    /// The joint positions of one frame.
    pub fn frame(&self, frame: usize) -> &[Position] {
        &self.positions[frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_bone_skeleton() -> Skeleton {
        Skeleton {
            joints: vec![
                Joint {
                    name: "hips".into(),
                    index: 0,
                    parent: None,
                    offset: Position::new(0.0, 0.0, 0.0),
                },
                Joint {
                    name: "spine".into(),
                    index: 1,
                    parent: Some(0),
                    offset: Position::new(0.0, 1.0, 0.0),
                },
            ],
        }
    }

    #[test]
    fn index_lookup_by_name() {
        let skel = two_bone_skeleton();
        assert_eq!(skel.index_of("spine"), Some(1));
        assert_eq!(skel.index_of("missing"), None);
    }

    #[test]
    fn root_is_the_parentless_joint() {
        let skel = two_bone_skeleton();
        let root = skel.root().unwrap();
        assert_eq!(root.index, 0);
        assert_eq!(skel.parent_of(1), Some(0));
    }

    #[test]
    fn same_layout_compares_names_and_indices() {
        let a = two_bone_skeleton();
        let b = two_bone_skeleton();
        assert!(a.same_layout(&b));

        let mut renamed = two_bone_skeleton();
        renamed.joints[1].name = "chest".into();
        assert!(!a.same_layout(&renamed));

        let mut truncated = two_bone_skeleton();
        truncated.joints.pop();
        assert!(!a.same_layout(&truncated));
    }
}
