use statig::prelude::*;

use crate::geom::{horizontal_dominant, Point};
use crate::timer::TimerSlot;

use super::{EventBuf, GestureEvent, GestureStateId, GestureTrace, RejectReason};

/// Vertical travel from the origin beyond which the session commits to drag.
pub const DRAG_START_PX: i32 = 5;
/// Rightward travel from the origin beyond which an uncommitted session
/// escapes, provided horizontal motion dominates.
pub const ESCAPE_DISTANCE_PX: i32 = 50;
/// Hold duration before an uncommitted session fires a long-press.
pub const LONG_PRESS_MS: u64 = 500;

#[derive(Clone, Copy, Debug)]
pub(super) enum GestureHsmEvent {
    Down { now_ms: u64, point: Point },
    Move { now_ms: u64, point: Point },
    Up { now_ms: u64 },
    Cancel { now_ms: u64 },
    Poll { now_ms: u64 },
}

#[derive(Default)]
pub(super) struct DispatchContext {
    pub(super) events: EventBuf,
}

impl DispatchContext {
    fn emit(&mut self, event: GestureEvent) {
        if self.events.push(event).is_err() {
            log::warn!("gesture event buffer overflow, dropping {event:?}");
        }
    }
}

pub(super) struct GestureHsm {
    down_point: Point,
    last_y: i32,
    long_press: TimerSlot,
    long_press_fired: bool,
    move_count: u16,
    last_trace: GestureTrace,
}

impl GestureHsm {
    pub(super) fn new() -> Self {
        Self {
            down_point: Point::default(),
            last_y: 0,
            long_press: TimerSlot::new(),
            long_press_fired: false,
            move_count: 0,
            last_trace: GestureTrace::default(),
        }
    }

    pub(super) fn last_trace(&self) -> GestureTrace {
        self.last_trace
    }

    pub(super) fn long_press_pending(&self) -> bool {
        self.long_press.is_armed()
    }

    fn begin_session(&mut self, now_ms: u64, point: Point) {
        self.down_point = point;
        self.last_y = point.y;
        self.long_press.arm(now_ms, LONG_PRESS_MS);
        self.long_press_fired = false;
        self.move_count = 0;
    }

    /// A second down while a session is open: single-pointer model, the old
    /// session is closed and a fresh one starts at the new point.
    fn restart_session(&mut self, context: &mut DispatchContext, now_ms: u64, point: Point) {
        context.emit(GestureEvent::Release);
        self.begin_session(now_ms, point);
        context.emit(GestureEvent::Down);
    }

    fn note(&mut self, now_ms: u64, state_id: GestureStateId, reject: RejectReason) {
        self.last_trace = GestureTrace {
            now_ms,
            state_id,
            reject,
            move_count: self.move_count,
        };
    }
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Down { now_ms, point } => {
                self.begin_session(*now_ms, *point);
                context.emit(GestureEvent::Down);
                self.note(*now_ms, GestureStateId::Idle, RejectReason::None);
                Transition(State::pressed())
            }
            GestureHsmEvent::Move { now_ms, .. }
            | GestureHsmEvent::Up { now_ms }
            | GestureHsmEvent::Cancel { now_ms } => {
                self.note(*now_ms, GestureStateId::Idle, RejectReason::NoSession);
                Handled
            }
            GestureHsmEvent::Poll { now_ms } => {
                self.note(*now_ms, GestureStateId::Idle, RejectReason::None);
                Handled
            }
        }
    }

    #[state]
    fn pressed(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Move { now_ms, point } => {
                self.move_count = self.move_count.saturating_add(1);
                let dx = point.x - self.down_point.x;
                let dy = point.y - self.down_point.y;
                self.note(*now_ms, GestureStateId::Pressed, RejectReason::None);
                if self.long_press_fired {
                    // Session is committed to expand; motion no longer counts.
                    return Handled;
                }
                if dy.abs() > DRAG_START_PX {
                    self.long_press.cancel();
                    let delta = self.last_y - point.y;
                    self.last_y = point.y;
                    if delta != 0 {
                        context.emit(GestureEvent::DragDelta(delta));
                    }
                    log::debug!("gesture: drag committed at dy={dy}");
                    return Transition(State::dragging());
                }
                if dx > ESCAPE_DISTANCE_PX && horizontal_dominant(dx, dy) {
                    self.long_press.cancel();
                    context.emit(GestureEvent::Escape);
                    context.emit(GestureEvent::Release);
                    log::debug!("gesture: escape committed at dx={dx}");
                    return Transition(State::escaped());
                }
                Handled
            }
            GestureHsmEvent::Poll { now_ms } => {
                self.note(*now_ms, GestureStateId::Pressed, RejectReason::None);
                if !self.long_press_fired && self.long_press.fire_due(*now_ms) {
                    self.long_press_fired = true;
                    context.emit(GestureEvent::LongPress);
                    log::debug!("gesture: long-press fired");
                }
                Handled
            }
            GestureHsmEvent::Up { now_ms } | GestureHsmEvent::Cancel { now_ms } => {
                self.long_press.cancel();
                context.emit(GestureEvent::Release);
                self.note(*now_ms, GestureStateId::Pressed, RejectReason::None);
                Transition(State::idle())
            }
            GestureHsmEvent::Down { now_ms, point } => {
                self.restart_session(context, *now_ms, *point);
                self.note(*now_ms, GestureStateId::Pressed, RejectReason::None);
                Transition(State::pressed())
            }
        }
    }

    #[state]
    fn dragging(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Move { now_ms, point } => {
                self.move_count = self.move_count.saturating_add(1);
                let delta = self.last_y - point.y;
                self.last_y = point.y;
                if delta != 0 {
                    context.emit(GestureEvent::DragDelta(delta));
                }
                self.note(*now_ms, GestureStateId::Dragging, RejectReason::None);
                Handled
            }
            GestureHsmEvent::Up { now_ms } | GestureHsmEvent::Cancel { now_ms } => {
                context.emit(GestureEvent::Release);
                self.note(*now_ms, GestureStateId::Dragging, RejectReason::None);
                Transition(State::idle())
            }
            GestureHsmEvent::Poll { now_ms } => {
                self.note(*now_ms, GestureStateId::Dragging, RejectReason::None);
                Handled
            }
            GestureHsmEvent::Down { now_ms, point } => {
                self.restart_session(context, *now_ms, *point);
                self.note(*now_ms, GestureStateId::Dragging, RejectReason::None);
                Transition(State::pressed())
            }
        }
    }

    /// Escape already emitted its `Release`; everything until the physical
    /// up is swallowed.
    #[state]
    fn escaped(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Up { now_ms } | GestureHsmEvent::Cancel { now_ms } => {
                self.note(*now_ms, GestureStateId::Escaped, RejectReason::None);
                Transition(State::idle())
            }
            GestureHsmEvent::Move { now_ms, .. } | GestureHsmEvent::Poll { now_ms } => {
                self.note(*now_ms, GestureStateId::Escaped, RejectReason::None);
                Handled
            }
            GestureHsmEvent::Down { now_ms, point } => {
                self.begin_session(*now_ms, *point);
                context.emit(GestureEvent::Down);
                self.note(*now_ms, GestureStateId::Escaped, RejectReason::None);
                Transition(State::pressed())
            }
        }
    }
}
