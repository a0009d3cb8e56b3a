//! Pulse parameters for the vibration motor.
//!
//! Strength maps inversely: a "stronger" setting means shorter, sharper
//! pulses at lower amplitude, which reads as crisper ticks on most motors.

use crate::config::HapticStrength;
use crate::events::HapticPulse;

/// Fixed pulse for entering expand mode, independent of the strength
/// setting.
pub const EXPAND_PULSE: HapticPulse = HapticPulse {
    duration_ms: 60,
    amplitude: 255,
};

/// Pulse for a value tick at the configured strength.
pub fn tick_pulse(strength: HapticStrength) -> HapticPulse {
    match strength {
        HapticStrength::Low => HapticPulse {
            duration_ms: 40,
            amplitude: 220,
        },
        HapticStrength::Medium => HapticPulse {
            duration_ms: 28,
            amplitude: 160,
        },
        HapticStrength::High => HapticPulse {
            duration_ms: 16,
            amplitude: 96,
        },
    }
}
