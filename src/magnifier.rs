// All per-tick state in one place: sample -> detect -> animate -> pick next interval.
// No window types in here; the scheduler in main.rs hands the result to the renderer.

use crate::animator::{AnimationState, ScaleAnimator};
use crate::config::Tuning;
use crate::poll::PollRateController;
use crate::sampler::MotionSampler;
use crate::shake::ShakeDetector;
use crate::types::{Point, Sample};
use std::time::{Duration, Instant};

/// What one tick decided.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub position: Point,
    pub shaking: bool,
    pub animation: AnimationState,
    /// Wait this long before the next tick.
    pub interval: Duration,
}

pub struct Magnifier {
    tuning: Tuning,
    sampler: MotionSampler,
    shake: ShakeDetector,
    animator: ScaleAnimator,
    poll: PollRateController,
    was_shaking: bool,
}

impl Magnifier {
    pub fn new(tuning: Tuning, origin: Point, started: Instant) -> Self {
        Self {
            tuning,
            sampler: MotionSampler::new(origin),
            shake: ShakeDetector::new(tuning, started),
            animator: ScaleAnimator::new(tuning),
            poll: PollRateController::new(tuning),
            was_shaking: false,
        }
    }

    /// Starting interval before any tick has run.
    pub fn initial_interval(&self) -> Duration {
        self.poll.state().current_interval
    }

    pub fn tick(&mut self, now: Instant, position: Point) -> Frame {
        let sample = Sample { position, at: now };
        let motion = self.sampler.sample(sample);
        let shaking = self.shake.update(motion, sample.at);
        let animation = self.animator.step(shaking);

        let moved = motion.distance > self.tuning.movement_threshold as f64;
        let since_motion = now.saturating_duration_since(self.shake.state().last_movement);
        let interval = self.poll.update(moved, since_motion);

        if shaking != self.was_shaking {
            if shaking {
                tracing::debug!(
                    reversals = self.shake.state().direction_change_count,
                    "shake detected"
                );
            } else {
                tracing::debug!(scale = animation.current_scale, "shake ended");
            }
            self.was_shaking = shaking;
        }

        tracing::trace!(
            x = position.x,
            y = position.y,
            scale = animation.current_scale,
            phase = ?self.animator.phase(),
            "tick"
        );
        Frame { position, shaking, animation, interval }
    }
}
