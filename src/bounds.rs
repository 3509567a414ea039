use crate::types::{Motion, Position};

/// Fraction of an axis's raw range added on each side.
const PADDING: f64 = 0.1;

/// Padded `(min, max)` extent of one spatial axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    fn padded(raw_min: f64, raw_max: f64) -> Self {
        let pad = (raw_max - raw_min) * PADDING;
        AxisBounds {
            min: raw_min - pad,
            max: raw_max + pad,
        }
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> f64 {
        self.max - self.min
    }
}

/// Padded axis-aligned extents of a whole motion, computed once over every
/// frame and joint so the camera frame stays put during playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: AxisBounds,
    pub y: AxisBounds,
    pub z: AxisBounds,
}

impl Bounds {
    /// Reduce min/max per axis over the motion's entire trajectory, then pad
    /// each side by 10% of that axis's range. A zero-range axis collapses to
    /// a single point; that is accepted, not an error.
    pub fn of_motion(motion: &Motion) -> Bounds {
        let mut min = Position::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Position::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

        for frame in &motion.positions {
            for pos in frame {
                min.x = min.x.min(pos.x);
                min.y = min.y.min(pos.y);
                min.z = min.z.min(pos.z);
                max.x = max.x.max(pos.x);
                max.y = max.y.max(pos.y);
                max.z = max.z.max(pos.z);
            }
        }

        Bounds {
            x: AxisBounds::padded(min.x, max.x),
            y: AxisBounds::padded(min.y, max.y),
            z: AxisBounds::padded(min.z, max.z),
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x.center(), self.y.center(), self.z.center())
    }
}
