// Shake detection: count direction reversals that arrive close together.
//
// Every qualifying reversal pushes the deadline out by `shake_timeout`, so the window
// slides: steady back-and-forth keeps the counter alive until motion pauses.

use crate::config::Tuning;
use crate::types::{Direction, Motion};
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct ShakeState {
    pub last_direction: Direction,
    pub direction_change_count: u32,
    pub last_change: Instant,
    pub last_movement: Instant,
}

pub struct ShakeDetector {
    tuning: Tuning,
    state: ShakeState,
}

impl ShakeDetector {
    pub fn new(tuning: Tuning, started: Instant) -> Self {
        Self {
            tuning,
            state: ShakeState {
                last_direction: Direction::None,
                direction_change_count: 0,
                last_change: started,
                last_movement: started,
            },
        }
    }

    pub fn state(&self) -> &ShakeState {
        &self.state
    }

    /// Feed one tick of motion. Returns true while the reversal count is at or above threshold.
    pub fn update(&mut self, motion: Motion, now: Instant) -> bool {
        let threshold = self.tuning.movement_threshold;
        let st = &mut self.state;

        if motion.distance > threshold as f64 {
            st.last_movement = now;
            let direction = Direction::classify(motion.delta, threshold);

            if direction != Direction::None && direction != st.last_direction {
                if now.saturating_duration_since(st.last_change) < self.tuning.shake_timeout {
                    st.direction_change_count += 1;
                } else {
                    st.direction_change_count = 1;
                }
                st.last_change = now;
            }
            // Tie ticks store `None` too; the next classified move then counts as a change.
            st.last_direction = direction;
        }

        if now.saturating_duration_since(st.last_change) > self.tuning.shake_timeout {
            st.direction_change_count = 0;
        }

        st.direction_change_count >= self.tuning.shake_threshold
    }
}
