//! Scroll tweens
//!
//! A fixed-duration interpolation between two scroll offsets.

use crate::easing::Easing;

/// Interpolates a scroll offset from `from` to `to` over `duration_ms`
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    duration_ms: u32,
    easing: Easing,
    elapsed_ms: f32,
}

impl ScrollTween {
    pub fn new(from: f64, to: f64, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing: Easing::default(),
            elapsed_ms: 0.0,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn from_value(&self) -> f64 {
        self.from
    }

    /// Linear progress through the duration (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current offset. Exactly `to` once finished.
    pub fn value(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress()) as f64;
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if self.is_finished() {
            return;
        }
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_tween() {
        let mut tween = ScrollTween::new(1000.0, 0.0, 400).with_easing(Easing::Linear);
        assert_eq!(tween.value(), 1000.0);

        tween.tick(100.0);
        assert!((tween.value() - 750.0).abs() < 1e-3);

        tween.tick(200.0);
        assert!((tween.value() - 250.0).abs() < 1e-3);
        assert!(!tween.is_finished());

        tween.tick(500.0);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let tween = ScrollTween::new(300.0, 0.0, 0);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_swing_moves_monotonically() {
        let mut tween = ScrollTween::new(800.0, 0.0, 160);
        let mut last = tween.value();
        while !tween.is_finished() {
            tween.tick(16.0);
            let value = tween.value();
            assert!(value <= last);
            last = value;
        }
        assert_eq!(last, 0.0);
    }
}
