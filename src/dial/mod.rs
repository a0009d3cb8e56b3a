//! Dial controller: owns the value, the expand machine and the haptic
//! policy, and turns classified gestures plus host calls into actions.

mod expand;
pub mod haptics;
mod value;


pub use expand::ExpandStateId;

use crate::config::DialConfig;
use crate::events::{DialAction, DialOutput, HapticKind};
use crate::gesture::GestureEvent;
use crate::Fx;

use expand::{ExpandEngine, ExpandSignal, SignalBuf};
use value::ValueState;

pub struct DialController {
    config: DialConfig,
    value: ValueState,
    expand: ExpandEngine,
    haptic_backend_ok: bool,
    touching: bool,
}

impl DialController {
    pub fn new(config: DialConfig, initial_value: i32) -> Self {
        Self {
            config: config.sanitized(),
            value: ValueState::new(initial_value),
            expand: ExpandEngine::new(),
            haptic_backend_ok: true,
            touching: false,
        }
    }

    pub fn handle_gesture(&mut self, now_ms: u64, event: GestureEvent, out: &mut DialOutput) {
        match event {
            GestureEvent::Down => {
                self.touching = true;
                self.value.on_touch_start();
                out.push(DialAction::InteractionStart);
                let signals = self.expand.touch_down();
                self.drain_expand(signals, out);
            }
            GestureEvent::DragDelta(delta_px) => {
                if let Some(value) = self.value.apply_drag_delta(delta_px, self.config.sensitivity)
                {
                    out.push(DialAction::ValueChanged(value));
                    self.emit_haptic(HapticKind::ValueTick, out);
                }
            }
            GestureEvent::LongPress => {
                let signals = self.expand.long_press(now_ms);
                self.drain_expand(signals, out);
            }
            GestureEvent::Escape => {
                out.push(DialAction::EscapeRequested);
            }
            GestureEvent::Release => {
                self.touching = false;
                self.value.on_touch_end();
                let signals = self.expand.release(now_ms);
                self.drain_expand(signals, out);
                out.push(DialAction::InteractionEnd);
            }
        }
    }

    /// Advances animations and the auto-return deadline.
    pub fn tick(&mut self, now_ms: u64, out: &mut DialOutput) {
        let signals = self.expand.tick(now_ms);
        self.drain_expand(signals, out);
    }

    /// Host-originated value write (system volume changed elsewhere).
    /// Counts as activity for the auto-return deadline.
    pub fn set_value_external(&mut self, now_ms: u64, raw: i32, out: &mut DialOutput) {
        let result = self.value.set_external(now_ms, raw, self.touching);
        if let Some(value) = result.changed {
            out.push(DialAction::ValueChanged(value));
        }
        if result.haptic {
            self.emit_haptic(HapticKind::ValueTick, out);
        }
        let signals = self.expand.activity(now_ms);
        self.drain_expand(signals, out);
    }

    pub fn set_config(&mut self, config: DialConfig) {
        self.config = config.sanitized();
    }

    /// Immediate reset to collapsed with no animation. Idempotent: emits
    /// nothing when already collapsed.
    pub fn force_reset(&mut self, out: &mut DialOutput) {
        let signals = self.expand.force_reset();
        self.drain_expand(signals, out);
        self.value.reset_accumulator();
        self.touching = false;
    }

    /// Early auto-return: animates back to collapsed. No-op when already
    /// collapsed or collapsing.
    pub fn smooth_reset(&mut self, now_ms: u64, out: &mut DialOutput) {
        let signals = self.expand.smooth_reset(now_ms);
        self.drain_expand(signals, out);
    }

    /// The host's vibration backend stopped working; switch every pulse to
    /// the fallback action from now on.
    pub fn haptic_backend_failed(&mut self) {
        if self.haptic_backend_ok {
            log::warn!("haptic backend failed, falling back to generic feedback");
        }
        self.haptic_backend_ok = false;
    }

    pub fn value(&self) -> u8 {
        self.value.get()
    }

    /// Display shadow chasing the authoritative value; pure sample.
    pub fn animated_value(&self, now_ms: u64) -> u8 {
        self.value.animated_value(now_ms)
    }

    pub fn expand_state(&self) -> ExpandStateId {
        self.expand.state_id()
    }

    pub fn is_expanded(&self) -> bool {
        self.expand.state_id() == ExpandStateId::Expanded
    }

    pub fn expand_progress(&self) -> Fx {
        self.expand.progress()
    }

    pub fn auto_return_pending(&self) -> bool {
        self.expand.auto_return_pending()
    }

    pub fn config(&self) -> DialConfig {
        self.config
    }

    fn drain_expand(&mut self, signals: SignalBuf, out: &mut DialOutput) {
        for signal in signals {
            match signal {
                ExpandSignal::Progress(progress) => {
                    out.push(DialAction::ExpandProgress(progress));
                }
                ExpandSignal::Entered => out.push(DialAction::ExpandModeChanged(true)),
                ExpandSignal::Left => out.push(DialAction::ExpandModeChanged(false)),
                ExpandSignal::Pop => self.emit_haptic(HapticKind::ExpandPop, out),
            }
        }
    }

    fn emit_haptic(&mut self, kind: HapticKind, out: &mut DialOutput) {
        if !self.config.haptics_enabled {
            return;
        }
        if !self.haptic_backend_ok {
            out.push(DialAction::FeedbackFallback);
            return;
        }
        let pulse = match kind {
            HapticKind::ValueTick => haptics::tick_pulse(self.config.haptic_strength),
            HapticKind::ExpandPop => haptics::EXPAND_PULSE,
        };
        out.push(DialAction::HapticRequested { kind, pulse });
    }
}
