// Turns consecutive pointer readings into per-tick displacement.

use crate::types::{Motion, Point, Sample};

pub struct MotionSampler {
    last_position: Point,
}

impl MotionSampler {
    /// Start from wherever the pointer is at launch so the first tick sees no jump.
    pub fn new(origin: Point) -> Self {
        Self { last_position: origin }
    }

    /// Displacement since the previous sample. The new position always becomes the baseline.
    pub fn sample(&mut self, sample: Sample) -> Motion {
        let delta = sample.position - self.last_position;
        self.last_position = sample.position;
        Motion { delta, distance: delta.length() }
    }
}
