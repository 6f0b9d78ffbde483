// Scale animation driven once per tick by the shake signal.
// Visual outcomes:
// - Shake starts: the big cursor pops in at 1.1x and eases upward 0.1x per tick.
// - Keep shaking: the ceiling creeps up 0.02x per tick until 10x.
// - Stop shaking: it collapses 1.0x per tick and disappears at 1.0x.

use crate::config::Tuning;

/// Snapshot read by the overlay renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub current_scale: f64,
    pub target_scale: f64,
    pub is_scaling: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Growing,
    Decaying,
}

pub struct ScaleAnimator {
    tuning: Tuning,
    state: AnimationState,
}

impl ScaleAnimator {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            state: AnimationState {
                current_scale: tuning.min_scale,
                target_scale: tuning.min_scale,
                is_scaling: false,
                visible: false,
            },
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_scaling {
            Phase::Growing
        } else if self.state.current_scale > self.tuning.min_scale {
            Phase::Decaying
        } else {
            Phase::Idle
        }
    }

    /// Advance one tick.
    pub fn step(&mut self, shaking: bool) -> AnimationState {
        let t = self.tuning;

        if shaking {
            if !self.state.is_scaling {
                self.state.is_scaling = true;
                self.set_current(t.min_scale);
                self.set_target(t.min_scale + t.initial_boost);
            } else {
                self.set_target(self.state.target_scale + t.target_growth);
            }
        } else {
            self.state.is_scaling = false;
            self.set_target(t.min_scale);
        }

        if !self.state.is_scaling {
            self.set_current(self.state.current_scale - t.decay_step);
            if self.state.current_scale <= t.min_scale {
                self.state.visible = false;
            }
            return self.state;
        }

        if self.state.current_scale < self.state.target_scale {
            let next = (self.state.current_scale + t.scale_step).min(self.state.target_scale);
            self.set_current(next);
            self.state.visible = true;
        }
        self.state
    }

    fn set_current(&mut self, scale: f64) {
        self.state.current_scale = self.tuning.clamp_scale(scale);
    }

    fn set_target(&mut self, scale: f64) {
        self.state.target_scale = self.tuning.clamp_scale(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn first_shaking_tick_pops_in_just_above_min() {
        let mut anim = ScaleAnimator::new(Tuning::default());
        assert_eq!(anim.phase(), Phase::Idle);

        let s = anim.step(true);
        assert!(s.is_scaling && s.visible);
        assert!((s.current_scale - 1.1).abs() < EPS);
        assert!((s.target_scale - 1.5).abs() < EPS);
        assert_eq!(anim.phase(), Phase::Growing);
    }

    #[test]
    fn idle_ticks_stay_hidden_at_min() {
        let mut anim = ScaleAnimator::new(Tuning::default());
        for _ in 0..5 {
            let s = anim.step(false);
            assert!(!s.visible);
            assert_eq!(s.current_scale, 1.0);
        }
    }

    #[test]
    fn target_is_capped_at_max_scale() {
        let mut anim = ScaleAnimator::new(Tuning::default());
        let mut s = anim.step(true);
        for _ in 0..2_000 {
            s = anim.step(true);
        }
        assert!((s.target_scale - 10.0).abs() < EPS);
        assert!((s.current_scale - 10.0).abs() < EPS);
    }

    #[test]
    fn decay_drops_one_per_tick_then_hides() {
        let mut anim = ScaleAnimator::new(Tuning::default());
        for _ in 0..200 {
            anim.step(true);
        }
        let start = anim.state().current_scale;
        assert!(start > 5.0);

        let mut prev = start;
        let mut ticks = 0;
        loop {
            let s = anim.step(false);
            ticks += 1;
            if s.current_scale <= 1.0 {
                assert!(!s.visible);
                break;
            }
            assert!((prev - s.current_scale - 1.0).abs() < EPS);
            assert!(s.visible);
            assert_eq!(anim.phase(), Phase::Decaying);
            prev = s.current_scale;
        }
        assert_eq!(ticks, (start - 1.0).ceil() as usize);

        // Stays hidden until shaking resumes.
        for _ in 0..3 {
            assert!(!anim.step(false).visible);
        }
        assert!(anim.step(true).visible);
    }

    #[test]
    fn resuming_during_decay_restarts_from_min() {
        let mut anim = ScaleAnimator::new(Tuning::default());
        for _ in 0..100 {
            anim.step(true);
        }
        anim.step(false);
        let s = anim.step(true);
        assert!((s.current_scale - 1.1).abs() < EPS);
        assert!((s.target_scale - 1.5).abs() < EPS);
    }

    proptest! {
        #[test]
        fn growth_is_monotonic_and_bounded(ticks in 1usize..800) {
            let mut anim = ScaleAnimator::new(Tuning::default());
            let mut prev = anim.state();
            for _ in 0..ticks {
                let s = anim.step(true);
                prop_assert!(s.current_scale >= prev.current_scale - EPS);
                prop_assert!(s.target_scale >= prev.target_scale - EPS);
                prop_assert!(s.current_scale <= s.target_scale + EPS);
                prop_assert!(s.target_scale <= 10.0 + EPS);
                prev = s;
            }
        }

        #[test]
        fn scale_stays_in_range_for_any_signal(signal in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut anim = ScaleAnimator::new(Tuning::default());
            for shaking in signal {
                let s = anim.step(shaking);
                prop_assert!((1.0..=10.0).contains(&s.current_scale));
                prop_assert!((1.0..=10.0).contains(&s.target_scale));
                prop_assert_eq!(s.visible, s.current_scale > 1.0);
            }
        }
    }
}
