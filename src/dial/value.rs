//! Authoritative dial value, drag-to-value mapping, and the animated
//! display shadow.

use crate::anim::Anim;
use crate::Fx;

pub(super) const VALUE_MIN: i32 = 0;
pub(super) const VALUE_MAX: i32 = 100;
/// 99 reads as a rendering glitch next to a full arc, so it snaps to 100.
const VALUE_SNAP_FROM: i32 = 99;
/// Duration of the display shadow's chase toward the authoritative value.
const VALUE_ANIM_MS: u64 = 90;
/// Accumulated pixels must reach `2 / sensitivity` before any step applies.
const DEAD_ZONE_NUMERATOR: i32 = 2;
/// Keeps the accumulator inside the fixed-point range when a drag is
/// pinned at a rail.
const ACCUM_LIMIT_PX: i32 = 16_384;

/// Result of an external value write.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct ExternalSet {
    pub(super) changed: Option<u8>,
    pub(super) haptic: bool,
}

pub(super) struct ValueState {
    value: i32,
    /// Last value a haptic pulse was issued for; dedups external changes.
    haptic_value: i32,
    /// Drag pixels not yet converted into a step.
    accumulated: i32,
    anim: Option<Anim>,
}

impl ValueState {
    pub(super) fn new(initial: i32) -> Self {
        let value = clamp_snap(initial);
        Self {
            value,
            haptic_value: value,
            accumulated: 0,
            anim: None,
        }
    }

    pub(super) fn get(&self) -> u8 {
        self.value as u8
    }

    /// Folds one committed drag delta into the accumulator; returns the new
    /// value when the dead zone is crossed and the step actually moves it.
    pub(super) fn apply_drag_delta(&mut self, delta_px: i32, sensitivity: Fx) -> Option<u8> {
        self.accumulated = self
            .accumulated
            .saturating_add(delta_px)
            .clamp(-ACCUM_LIMIT_PX, ACCUM_LIMIT_PX);
        let accumulated = Fx::from_num(self.accumulated);
        let dead_zone = Fx::from_num(DEAD_ZONE_NUMERATOR) / sensitivity;
        if accumulated.abs() < dead_zone {
            return None;
        }
        let step: i32 = (accumulated * sensitivity).round().to_num();
        let next = clamp_snap(self.value + step);
        if next == self.value {
            // Pinned at a rail: the accumulator is retained (the source
            // behavior never resets on a no-change step), capped by
            // ACCUM_LIMIT_PX to stay in fixed-point range.
            return None;
        }
        self.value = next;
        self.haptic_value = next;
        self.accumulated = 0;
        self.anim = None;
        Some(next as u8)
    }

    /// Applies a host-originated value write. The display shadow animates
    /// toward it unless a touch session is live.
    pub(super) fn set_external(&mut self, now_ms: u64, raw: i32, touching: bool) -> ExternalSet {
        let next = clamp_snap(raw);
        let haptic = next != self.haptic_value;
        self.haptic_value = next;
        if next == self.value {
            return ExternalSet {
                changed: None,
                haptic,
            };
        }
        if touching {
            self.anim = None;
        } else {
            let from = self.animated_sample(now_ms);
            self.anim = Some(Anim::new(now_ms, VALUE_ANIM_MS, from, Fx::from_num(next)));
        }
        self.value = next;
        ExternalSet {
            changed: Some(next as u8),
            haptic,
        }
    }

    /// While touching, the shadow tracks the authoritative value exactly.
    pub(super) fn on_touch_start(&mut self) {
        self.anim = None;
        self.accumulated = 0;
    }

    pub(super) fn on_touch_end(&mut self) {
        self.accumulated = 0;
    }

    pub(super) fn reset_accumulator(&mut self) {
        self.accumulated = 0;
    }

    /// Pure sample of the display shadow at `now_ms`.
    pub(super) fn animated_value(&self, now_ms: u64) -> u8 {
        let sample: i32 = self.animated_sample(now_ms).round().to_num();
        sample.clamp(VALUE_MIN, VALUE_MAX) as u8
    }

    fn animated_sample(&self, now_ms: u64) -> Fx {
        match &self.anim {
            Some(anim) => anim.sample(now_ms).0,
            None => Fx::from_num(self.value),
        }
    }
}

/// Clamps into [0, 100] and snaps 99 up to 100. Applied on every write path
/// so 99 is never observable.
pub(super) fn clamp_snap(raw: i32) -> i32 {
    let value = raw.clamp(VALUE_MIN, VALUE_MAX);
    if value == VALUE_SNAP_FROM {
        VALUE_MAX
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sens(value: f64) -> Fx {
        Fx::from_num(value)
    }

    #[test]
    fn snap_covers_both_write_paths() {
        assert_eq!(clamp_snap(99), 100);
        assert_eq!(clamp_snap(98), 98);
        assert_eq!(clamp_snap(250), 100);
        assert_eq!(clamp_snap(-3), 0);
    }

    #[test]
    fn drag_steps_round_half_away_from_zero() {
        let mut value = ValueState::new(64);
        // 5 px at sensitivity 0.5: dead zone is 4, step = round(2.5) = 3.
        assert_eq!(value.apply_drag_delta(5, sens(0.5)), Some(67));
        assert_eq!(value.apply_drag_delta(5, sens(0.5)), Some(70));
        assert_eq!(value.apply_drag_delta(5, sens(0.5)), Some(73));
    }

    #[test]
    fn sub_dead_zone_deltas_accumulate_silently() {
        let mut value = ValueState::new(50);
        assert_eq!(value.apply_drag_delta(3, sens(0.5)), None);
        // Accumulated 4 reaches the dead zone: step = round(2) = 2.
        assert_eq!(value.apply_drag_delta(1, sens(0.5)), Some(52));
    }

    #[test]
    fn opposite_deltas_cancel_in_the_accumulator() {
        let mut value = ValueState::new(50);
        assert_eq!(value.apply_drag_delta(3, sens(0.5)), None);
        assert_eq!(value.apply_drag_delta(-3, sens(0.5)), None);
        assert_eq!(value.get(), 50);
    }

    #[test]
    fn drag_never_lands_on_99() {
        let mut value = ValueState::new(96);
        // Step of +3 would land on 99; it snaps to 100 instead.
        assert_eq!(value.apply_drag_delta(6, sens(0.5)), Some(100));
    }

    #[test]
    fn rails_hold_under_continued_drag() {
        let mut value = ValueState::new(100);
        assert_eq!(value.apply_drag_delta(40, sens(1.0)), None);
        assert_eq!(value.get(), 100);

        let mut value = ValueState::new(0);
        assert_eq!(value.apply_drag_delta(-40, sens(1.0)), None);
        assert_eq!(value.get(), 0);
    }

    #[test]
    fn external_set_dedups_haptics() {
        let mut value = ValueState::new(40);
        let first = value.set_external(0, 55, false);
        assert_eq!(first.changed, Some(55));
        assert!(first.haptic);

        let second = value.set_external(10, 55, false);
        assert_eq!(second.changed, None);
        assert!(!second.haptic);
    }

    #[test]
    fn external_set_snaps_99() {
        let mut value = ValueState::new(40);
        assert_eq!(value.set_external(0, 99, false).changed, Some(100));
    }

    #[test]
    fn shadow_animates_when_untouched_and_snaps_when_touched() {
        let mut value = ValueState::new(0);
        let _ = value.set_external(1_000, 100, false);
        // Mid-animation the shadow lags the authoritative value.
        assert!(value.animated_value(1_010) < 100);
        assert_eq!(value.animated_value(1_090), 100);

        let mut touched = ValueState::new(0);
        let _ = touched.set_external(1_000, 100, true);
        assert_eq!(touched.animated_value(1_000), 100);
    }

    #[test]
    fn touch_start_snaps_an_in_flight_shadow() {
        let mut value = ValueState::new(0);
        let _ = value.set_external(1_000, 100, false);
        value.on_touch_start();
        assert_eq!(value.animated_value(1_001), 100);
    }
}
