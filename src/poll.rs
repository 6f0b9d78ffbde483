// Adaptive tick interval: fast while the pointer moves, slow when it rests.

use crate::config::Tuning;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    pub is_active: bool,
    pub current_interval: Duration,
}

pub struct PollRateController {
    tuning: Tuning,
    state: PollState,
}

impl PollRateController {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            state: PollState { is_active: false, current_interval: tuning.idle_interval },
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// `moved` is whether this tick's distance exceeded the movement threshold;
    /// `since_motion` is how long ago the last such tick was. Returns the interval
    /// to wait before the next tick.
    pub fn update(&mut self, moved: bool, since_motion: Duration) -> Duration {
        let t = &self.tuning;
        let st = &mut self.state;
        let before = st.current_interval;

        if moved {
            if !st.is_active {
                st.is_active = true;
                st.current_interval = t.active_interval;
            }
        } else if since_motion > t.idle_threshold {
            if st.is_active || st.current_interval == t.idle_interval {
                st.is_active = false;
                st.current_interval = t.very_idle_interval;
            }
        } else if !st.is_active && st.current_interval != t.idle_interval {
            st.current_interval = t.idle_interval;
        }

        if st.current_interval != before {
            tracing::debug!(
                from_ms = before.as_millis() as u64,
                to_ms = st.current_interval.as_millis() as u64,
                "poll interval changed"
            );
        }
        st.current_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn starts_idle() {
        let poll = PollRateController::new(Tuning::default());
        assert_eq!(poll.state(), PollState { is_active: false, current_interval: ms(250) });
    }

    #[test]
    fn motion_switches_to_active_immediately() {
        let mut poll = PollRateController::new(Tuning::default());
        assert_eq!(poll.update(true, Duration::ZERO), ms(50));
        assert!(poll.state().is_active);
        // Short pauses keep the fast rate.
        assert_eq!(poll.update(false, ms(1500)), ms(50));
    }

    #[test]
    fn long_rest_drops_to_very_idle_and_stays() {
        let mut poll = PollRateController::new(Tuning::default());
        poll.update(true, Duration::ZERO);
        assert_eq!(poll.update(false, ms(2100)), ms(500));
        assert!(!poll.state().is_active);
        assert_eq!(poll.update(false, ms(9000)), ms(500));
        assert_eq!(poll.update(true, Duration::ZERO), ms(50));
    }

    #[test]
    fn startup_idle_also_decays_to_very_idle() {
        let mut poll = PollRateController::new(Tuning::default());
        assert_eq!(poll.update(false, ms(100)), ms(250));
        assert_eq!(poll.update(false, ms(2500)), ms(500));
    }
}
