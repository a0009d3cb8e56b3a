//! Host-clock-driven animation sampling with a decelerating ease.

use crate::Fx;

/// Decelerating ease: `1 - (1 - t)^2`. Fast start, slow settle.
pub fn decelerate(t: Fx) -> Fx {
    let inv = Fx::ONE - t;
    Fx::ONE - inv * inv
}

/// A single in-flight interpolation. Pure: sampling never mutates, so the
/// same clock value always yields the same progress.
#[derive(Clone, Copy, Debug)]
pub struct Anim {
    start_ms: u64,
    duration_ms: u64,
    from: Fx,
    to: Fx,
}

impl Anim {
    pub fn new(start_ms: u64, duration_ms: u64, from: Fx, to: Fx) -> Self {
        Self {
            start_ms,
            duration_ms,
            from,
            to,
        }
    }

    /// Samples the eased value at `now_ms`; the flag is true once the
    /// animation has run its full duration.
    pub fn sample(&self, now_ms: u64) -> (Fx, bool) {
        if self.duration_ms == 0 || now_ms >= self.start_ms.saturating_add(self.duration_ms) {
            return (self.to, true);
        }
        if now_ms <= self.start_ms {
            return (self.from, false);
        }
        let elapsed = now_ms - self.start_ms;
        let t = Fx::from_num(elapsed) / Fx::from_num(self.duration_ms);
        let eased = decelerate(t);
        (self.from + (self.to - self.from) * eased, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let anim = Anim::new(100, 300, Fx::ZERO, Fx::ONE);
        assert_eq!(anim.sample(100), (Fx::ZERO, false));
        assert_eq!(anim.sample(400), (Fx::ONE, true));
        assert_eq!(anim.sample(1_000), (Fx::ONE, true));
    }

    #[test]
    fn midpoint_runs_ahead_of_linear() {
        let anim = Anim::new(0, 300, Fx::ZERO, Fx::ONE);
        let (value, done) = anim.sample(150);
        assert!(!done);
        // decelerate(0.5) = 0.75
        assert_eq!(value, Fx::from_num(0.75));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let anim = Anim::new(50, 0, Fx::ZERO, Fx::ONE);
        assert_eq!(anim.sample(50), (Fx::ONE, true));
    }

    #[test]
    fn reverse_direction_interpolates_downward() {
        let anim = Anim::new(0, 200, Fx::ONE, Fx::ZERO);
        let (value, _) = anim.sample(100);
        assert_eq!(value, Fx::from_num(0.25));
    }
}
