//! Host facade: wires the gesture classifier into the dial controller.
//!
//! Call pattern: forward every pointer sample to `on_pointer_*`, call
//! [`Dial::tick`] on the render clock, and drain the returned actions.

#[cfg(test)]
mod tests;

use crate::config::DialConfig;
use crate::dial::{DialController, ExpandStateId};
use crate::events::{DialAction, DialOutput};
use crate::geom::Point;
use crate::gesture::{GestureEngine, GestureOutput, GestureTrace, RejectReason};
use crate::Fx;

/// Interactive radii beyond this would overflow the fixed-point scale math.
const MAX_RADIUS_PX: i32 = 16_000;

pub struct Dial {
    gestures: GestureEngine,
    controller: DialController,
    pivot: Point,
    base_radius_px: i32,
}

impl Dial {
    pub fn new(config: DialConfig, initial_value: i32) -> Self {
        Self {
            gestures: GestureEngine::new(),
            controller: DialController::new(config, initial_value),
            pivot: Point::default(),
            base_radius_px: 0,
        }
    }

    /// Dial center and unscaled radius in host pixels. The interactive
    /// radius is this radius times the configured size scale.
    pub fn set_geometry(&mut self, pivot: Point, radius_px: i32) {
        self.pivot = pivot;
        self.base_radius_px = radius_px.clamp(0, MAX_RADIUS_PX);
        self.apply_geometry();
    }

    /// Host gate for entry/exit animations; closed means downs are dropped.
    pub fn set_gate(&mut self, open: bool) {
        self.gestures.set_gate(open);
    }

    pub fn on_pointer_down(&mut self, now_ms: u64, x: i32, y: i32) -> DialOutput {
        let gestures = self.gestures.on_down(now_ms, Point::new(x, y));
        let mut out = DialOutput::new();
        if gestures.reject == RejectReason::OutsidePivot {
            out.push(DialAction::DismissRequested);
            return out;
        }
        self.route(now_ms, gestures, &mut out);
        out
    }

    pub fn on_pointer_move(&mut self, now_ms: u64, x: i32, y: i32) -> DialOutput {
        let gestures = self.gestures.on_move(now_ms, Point::new(x, y));
        let mut out = DialOutput::new();
        self.route(now_ms, gestures, &mut out);
        out
    }

    pub fn on_pointer_up(&mut self, now_ms: u64) -> DialOutput {
        let gestures = self.gestures.on_up(now_ms);
        let mut out = DialOutput::new();
        self.route(now_ms, gestures, &mut out);
        out
    }

    pub fn on_pointer_cancel(&mut self, now_ms: u64) -> DialOutput {
        let gestures = self.gestures.on_cancel(now_ms);
        let mut out = DialOutput::new();
        self.route(now_ms, gestures, &mut out);
        out
    }

    /// Advances the long-press deadline, animations and auto-return. Call
    /// on the host's frame clock.
    pub fn tick(&mut self, now_ms: u64) -> DialOutput {
        let gestures = self.gestures.poll(now_ms);
        let mut out = DialOutput::new();
        self.route(now_ms, gestures, &mut out);
        self.controller.tick(now_ms, &mut out);
        out
    }

    /// System volume changed outside the dial.
    pub fn set_value(&mut self, now_ms: u64, raw: i32) -> DialOutput {
        let mut out = DialOutput::new();
        self.controller.set_value_external(now_ms, raw, &mut out);
        out
    }

    /// Swaps in new configuration; values are sanitized, the interactive
    /// radius is rescaled.
    pub fn set_config(&mut self, config: DialConfig) {
        self.controller.set_config(config);
        self.apply_geometry();
    }

    /// Hard reset for overlay teardown: collapses instantly and discards
    /// any open touch session and pending deadline.
    pub fn force_reset(&mut self) -> DialOutput {
        let mut out = DialOutput::new();
        self.gestures.reset();
        self.controller.force_reset(&mut out);
        out
    }

    /// Collapse early with the normal animation; leaves the touch session
    /// alone.
    pub fn smooth_reset(&mut self, now_ms: u64) -> DialOutput {
        let mut out = DialOutput::new();
        self.controller.smooth_reset(now_ms, &mut out);
        out
    }

    pub fn haptic_backend_failed(&mut self) {
        self.controller.haptic_backend_failed();
    }

    pub fn value(&self) -> u8 {
        self.controller.value()
    }

    pub fn animated_value(&self, now_ms: u64) -> u8 {
        self.controller.animated_value(now_ms)
    }

    pub fn expand_state(&self) -> ExpandStateId {
        self.controller.expand_state()
    }

    pub fn is_expanded(&self) -> bool {
        self.controller.is_expanded()
    }

    pub fn expand_progress(&self) -> Fx {
        self.controller.expand_progress()
    }

    pub fn config(&self) -> DialConfig {
        self.controller.config()
    }

    pub fn gesture_trace(&self) -> GestureTrace {
        self.gestures.last_trace()
    }

    fn route(&mut self, now_ms: u64, gestures: GestureOutput, out: &mut DialOutput) {
        for event in gestures.events {
            self.controller.handle_gesture(now_ms, event, out);
        }
    }

    fn apply_geometry(&mut self) {
        let scale = self.controller.config().size_scale;
        let scaled: i32 = (Fx::from_num(self.base_radius_px) * scale).round().to_num();
        self.gestures.set_geometry(self.pivot, scaled);
    }
}
