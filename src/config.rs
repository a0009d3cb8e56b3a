//! Host-supplied dial configuration. The host persists and edits these
//! values; the core only sanitizes and consumes them.

use crate::Fx;

/// User-selected haptic strength. Pulse parameters map inversely, see
/// [`crate::dial::haptics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HapticStrength {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialConfig {
    /// Drag-to-value gain, clamped to [0.1, 1.0]. Higher is more reactive.
    pub sensitivity: Fx,
    pub haptics_enabled: bool,
    pub haptic_strength: HapticStrength,
    /// Dial size multiplier, clamped to [0.5, 2.0]. Scales the interactive
    /// radius along with whatever the renderer draws.
    pub size_scale: Fx,
    /// Renderer hint: draw the numeric value readout.
    pub show_number: bool,
    /// Renderer hint: draw the progress arc.
    pub show_arc: bool,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            sensitivity: Fx::from_num(0.5),
            haptics_enabled: true,
            haptic_strength: HapticStrength::Medium,
            size_scale: Fx::from_num(0.975),
            show_number: true,
            show_arc: true,
        }
    }
}

impl DialConfig {
    /// Clamps out-of-range fields into their documented ranges. Out-of-range
    /// input is host error but never fatal; clamping is logged.
    pub fn sanitized(self) -> Self {
        let mut config = self;
        config.sensitivity = clamp_logged(
            self.sensitivity,
            Fx::from_num(0.1),
            Fx::from_num(1.0),
            "sensitivity",
        );
        config.size_scale = clamp_logged(
            self.size_scale,
            Fx::from_num(0.5),
            Fx::from_num(2.0),
            "size_scale",
        );
        config
    }
}

fn clamp_logged(value: Fx, min: Fx, max: Fx, field: &str) -> Fx {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("config {field} {value} out of range, clamped to {clamped}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let config = DialConfig::default();
        assert_eq!(config.sanitized(), config);
    }

    #[test]
    fn sanitize_clamps_both_scalars() {
        let config = DialConfig {
            sensitivity: Fx::from_num(7),
            size_scale: Fx::from_num(0.01),
            ..DialConfig::default()
        };
        let sanitized = config.sanitized();
        assert_eq!(sanitized.sensitivity, Fx::from_num(1.0));
        assert_eq!(sanitized.size_scale, Fx::from_num(0.5));
    }

    #[test]
    fn sanitize_keeps_in_range_values() {
        let config = DialConfig {
            sensitivity: Fx::from_num(0.25),
            size_scale: Fx::from_num(1.5),
            ..DialConfig::default()
        };
        assert_eq!(config.sanitized(), config);
    }
}
