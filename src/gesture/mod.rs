//! Gesture classification for the dial's touch surface.
//!
//! One pointer session at a time. A session commits to exactly one of
//! vertical drag, rightward escape, or long-press; the first threshold
//! crossed wins and suppresses the others. The engine is polled: the host
//! feeds pointer samples and calls [`GestureEngine::poll`] on its frame
//! clock so the long-press deadline fires deterministically.

mod hsm;


use crate::geom::{squared_distance, Point};

use hsm::GestureHsm;
use statig::blocking::IntoStateMachineExt as _;

pub use hsm::{DRAG_START_PX, ESCAPE_DISTANCE_PX, LONG_PRESS_MS};

/// Downs are accepted up to this far beyond the scaled dial radius.
pub const PIVOT_MARGIN_PX: i32 = 200;

/// Committed gesture events, already disambiguated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEvent {
    /// Session opened inside the dial.
    Down,
    /// Committed vertical drag motion, sign-inverted so upward finger
    /// travel is positive.
    DragDelta(i32),
    /// Rightward slide before any other commitment. Ends the session; a
    /// `Release` follows immediately and the physical up is swallowed.
    Escape,
    /// Held still past the long-press deadline.
    LongPress,
    /// Session closed (up, cancel, or implicit after escape).
    Release,
}

/// Why a pointer sample produced no session activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RejectReason {
    #[default]
    None,
    /// Host gate closed (entry/exit animation in flight).
    Gated,
    /// Down landed beyond the acceptance radius.
    OutsidePivot,
    /// Move/up/poll with no open session.
    NoSession,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureStateId {
    #[default]
    Idle,
    Pressed,
    Dragging,
    Escaped,
}

/// Diagnostic sample updated after every engine call.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureTrace {
    pub now_ms: u64,
    pub state_id: GestureStateId,
    pub reject: RejectReason,
    pub move_count: u16,
}

const EVENT_CAPACITY: usize = 4;

pub(crate) type EventBuf = heapless::Vec<GestureEvent, EVENT_CAPACITY>;

/// Events emitted by one engine call, plus the reject reason when the
/// input produced none.
#[derive(Clone, Debug, Default)]
pub struct GestureOutput {
    pub events: EventBuf,
    pub reject: RejectReason,
}

pub struct GestureEngine {
    machine: statig::blocking::StateMachine<GestureHsm>,
    pivot: Point,
    accept_radius_px: i32,
    gate_open: bool,
    last_trace: GestureTrace,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEngine {
    pub fn new() -> Self {
        Self {
            machine: GestureHsm::new().state_machine(),
            pivot: Point::default(),
            accept_radius_px: 0,
            gate_open: true,
            last_trace: GestureTrace::default(),
        }
    }

    /// Sets the dial pivot and the scaled interactive radius in pixels.
    pub fn set_geometry(&mut self, pivot: Point, radius_px: i32) {
        self.pivot = pivot;
        self.accept_radius_px = radius_px.max(0);
    }

    /// Opens or closes the interaction gate. While closed, downs are
    /// dropped entirely; an already-open session is unaffected.
    pub fn set_gate(&mut self, open: bool) {
        self.gate_open = open;
    }

    /// Discards any open session and pending long-press deadline.
    pub fn reset(&mut self) {
        self.machine = GestureHsm::new().state_machine();
        self.last_trace = GestureTrace::default();
    }

    pub fn on_down(&mut self, now_ms: u64, point: Point) -> GestureOutput {
        if !self.gate_open {
            return self.reject(now_ms, RejectReason::Gated);
        }
        let limit = i64::from(self.accept_radius_px.saturating_add(PIVOT_MARGIN_PX));
        if squared_distance(point, self.pivot) > limit * limit {
            log::debug!(
                "gesture: down at ({}, {}) outside acceptance radius {limit}",
                point.x,
                point.y
            );
            return self.reject(now_ms, RejectReason::OutsidePivot);
        }
        self.dispatch(hsm::GestureHsmEvent::Down { now_ms, point })
    }

    pub fn on_move(&mut self, now_ms: u64, point: Point) -> GestureOutput {
        self.dispatch(hsm::GestureHsmEvent::Move { now_ms, point })
    }

    pub fn on_up(&mut self, now_ms: u64) -> GestureOutput {
        self.dispatch(hsm::GestureHsmEvent::Up { now_ms })
    }

    pub fn on_cancel(&mut self, now_ms: u64) -> GestureOutput {
        self.dispatch(hsm::GestureHsmEvent::Cancel { now_ms })
    }

    /// Advances the session clock; fires the long-press deadline when due.
    pub fn poll(&mut self, now_ms: u64) -> GestureOutput {
        self.dispatch(hsm::GestureHsmEvent::Poll { now_ms })
    }

    pub fn last_trace(&self) -> GestureTrace {
        self.last_trace
    }

    pub fn long_press_pending(&self) -> bool {
        self.machine.inner().long_press_pending()
    }

    fn dispatch(&mut self, event: hsm::GestureHsmEvent) -> GestureOutput {
        let mut context = hsm::DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        self.last_trace = self.machine.inner().last_trace();
        GestureOutput {
            events: context.events,
            reject: self.last_trace.reject,
        }
    }

    fn reject(&mut self, now_ms: u64, reason: RejectReason) -> GestureOutput {
        self.last_trace = GestureTrace {
            now_ms,
            state_id: self.last_trace.state_id,
            reject: reason,
            move_count: 0,
        };
        GestureOutput {
            events: EventBuf::new(),
            reject: reason,
        }
    }
}
