//! Expand-mode state machine: long-press pops the dial out, inactivity
//! returns it.

use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::anim::Anim;
use crate::timer::TimerSlot;
use crate::Fx;

pub(super) const EXPAND_MS: u64 = 300;
pub(super) const COLLAPSE_MS: u64 = 250;
/// Idle time in expanded mode before collapsing on its own. Only counts
/// while no touch is live; touch-down cancels it, release rearms it.
pub(super) const AUTO_RETURN_MS: u64 = 5_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpandStateId {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

/// Raw expand-machine output; the controller maps these onto host actions
/// and the haptic policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ExpandSignal {
    Progress(Fx),
    /// Expand animation finished; expanded mode engaged.
    Entered,
    /// Fully collapsed again.
    Left,
    /// Expansion started; the controller fires the pop haptic.
    Pop,
}

const SIGNAL_CAPACITY: usize = 4;

pub(super) type SignalBuf = heapless::Vec<ExpandSignal, SIGNAL_CAPACITY>;

#[derive(Clone, Copy, Debug)]
enum ExpandHsmEvent {
    LongPress { now_ms: u64 },
    TouchDown,
    Release { now_ms: u64 },
    /// Non-touch activity (external value change) while expanded.
    Activity { now_ms: u64 },
    Tick { now_ms: u64 },
    SmoothReset { now_ms: u64 },
    ForceReset,
}

#[derive(Default)]
struct DispatchContext {
    signals: SignalBuf,
}

impl DispatchContext {
    fn emit(&mut self, signal: ExpandSignal) {
        if self.signals.push(signal).is_err() {
            log::warn!("expand signal buffer overflow, dropping {signal:?}");
        }
    }
}

pub(super) struct ExpandEngine {
    machine: statig::blocking::StateMachine<ExpandHsm>,
}

impl Default for ExpandEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpandEngine {
    pub(super) fn new() -> Self {
        Self {
            machine: ExpandHsm::new().state_machine(),
        }
    }

    pub(super) fn long_press(&mut self, now_ms: u64) -> SignalBuf {
        self.dispatch(ExpandHsmEvent::LongPress { now_ms })
    }

    pub(super) fn touch_down(&mut self) -> SignalBuf {
        self.dispatch(ExpandHsmEvent::TouchDown)
    }

    pub(super) fn release(&mut self, now_ms: u64) -> SignalBuf {
        self.dispatch(ExpandHsmEvent::Release { now_ms })
    }

    pub(super) fn activity(&mut self, now_ms: u64) -> SignalBuf {
        self.dispatch(ExpandHsmEvent::Activity { now_ms })
    }

    pub(super) fn tick(&mut self, now_ms: u64) -> SignalBuf {
        self.dispatch(ExpandHsmEvent::Tick { now_ms })
    }

    pub(super) fn smooth_reset(&mut self, now_ms: u64) -> SignalBuf {
        self.dispatch(ExpandHsmEvent::SmoothReset { now_ms })
    }

    pub(super) fn force_reset(&mut self) -> SignalBuf {
        self.dispatch(ExpandHsmEvent::ForceReset)
    }

    pub(super) fn state_id(&self) -> ExpandStateId {
        self.machine.inner().state_id
    }

    pub(super) fn progress(&self) -> Fx {
        self.machine.inner().progress
    }

    pub(super) fn auto_return_pending(&self) -> bool {
        self.machine.inner().auto_return.is_armed()
    }

    fn dispatch(&mut self, event: ExpandHsmEvent) -> SignalBuf {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        context.signals
    }
}

struct ExpandHsm {
    progress: Fx,
    anim: Option<Anim>,
    auto_return: TimerSlot,
    touching: bool,
    state_id: ExpandStateId,
}

impl ExpandHsm {
    fn new() -> Self {
        Self {
            progress: Fx::ZERO,
            anim: None,
            auto_return: TimerSlot::new(),
            touching: false,
            state_id: ExpandStateId::Collapsed,
        }
    }

    fn start_expand(&mut self, now_ms: u64) {
        self.anim = Some(Anim::new(now_ms, EXPAND_MS, self.progress, Fx::ONE));
        self.auto_return.cancel();
        self.state_id = ExpandStateId::Expanding;
        log::debug!("expand: opening from progress {}", self.progress);
    }

    fn start_collapse(&mut self, now_ms: u64) {
        self.anim = Some(Anim::new(now_ms, COLLAPSE_MS, self.progress, Fx::ZERO));
        self.auto_return.cancel();
        self.state_id = ExpandStateId::Collapsing;
        log::debug!("expand: closing from progress {}", self.progress);
    }

    fn sample_anim(&self, now_ms: u64, resting: Fx) -> (Fx, bool) {
        match &self.anim {
            Some(anim) => anim.sample(now_ms),
            None => (resting, true),
        }
    }
}

#[state_machine(initial = "State::collapsed()")]
impl ExpandHsm {
    #[state(superstate = "running")]
    fn collapsed(
        &mut self,
        context: &mut DispatchContext,
        event: &ExpandHsmEvent,
    ) -> Outcome<State> {
        match event {
            ExpandHsmEvent::LongPress { now_ms } => {
                self.start_expand(*now_ms);
                context.emit(ExpandSignal::Pop);
                Transition(State::expanding())
            }
            // Already at rest: resets are no-ops and emit nothing.
            ExpandHsmEvent::ForceReset | ExpandHsmEvent::SmoothReset { .. } => Handled,
            ExpandHsmEvent::Tick { .. } | ExpandHsmEvent::Activity { .. } => Handled,
            _ => Super,
        }
    }

    #[state(superstate = "running")]
    fn expanding(
        &mut self,
        context: &mut DispatchContext,
        event: &ExpandHsmEvent,
    ) -> Outcome<State> {
        match event {
            ExpandHsmEvent::Tick { now_ms } => {
                let (progress, done) = self.sample_anim(*now_ms, Fx::ONE);
                self.progress = progress;
                context.emit(ExpandSignal::Progress(progress));
                if done {
                    self.anim = None;
                    context.emit(ExpandSignal::Entered);
                    if !self.touching {
                        self.auto_return.arm(*now_ms, AUTO_RETURN_MS);
                    }
                    self.state_id = ExpandStateId::Expanded;
                    return Transition(State::expanded());
                }
                Handled
            }
            ExpandHsmEvent::Release { now_ms } => {
                self.touching = false;
                self.auto_return.arm(*now_ms, AUTO_RETURN_MS);
                Handled
            }
            ExpandHsmEvent::SmoothReset { now_ms } => {
                self.start_collapse(*now_ms);
                Transition(State::collapsing())
            }
            ExpandHsmEvent::LongPress { .. } | ExpandHsmEvent::Activity { .. } => Handled,
            _ => Super,
        }
    }

    #[state(superstate = "running")]
    fn expanded(
        &mut self,
        context: &mut DispatchContext,
        event: &ExpandHsmEvent,
    ) -> Outcome<State> {
        let _ = context;
        match event {
            ExpandHsmEvent::Tick { now_ms } => {
                if !self.touching && self.auto_return.fire_due(*now_ms) {
                    self.start_collapse(*now_ms);
                    return Transition(State::collapsing());
                }
                Handled
            }
            ExpandHsmEvent::Release { now_ms } => {
                self.touching = false;
                self.auto_return.arm(*now_ms, AUTO_RETURN_MS);
                Handled
            }
            ExpandHsmEvent::Activity { now_ms } => {
                if !self.touching {
                    self.auto_return.arm(*now_ms, AUTO_RETURN_MS);
                }
                Handled
            }
            ExpandHsmEvent::SmoothReset { now_ms } => {
                self.start_collapse(*now_ms);
                Transition(State::collapsing())
            }
            ExpandHsmEvent::LongPress { .. } => Handled,
            _ => Super,
        }
    }

    #[state(superstate = "running")]
    fn collapsing(
        &mut self,
        context: &mut DispatchContext,
        event: &ExpandHsmEvent,
    ) -> Outcome<State> {
        match event {
            ExpandHsmEvent::Tick { now_ms } => {
                let (progress, done) = self.sample_anim(*now_ms, Fx::ZERO);
                self.progress = progress;
                context.emit(ExpandSignal::Progress(progress));
                if done {
                    self.anim = None;
                    context.emit(ExpandSignal::Left);
                    self.state_id = ExpandStateId::Collapsed;
                    return Transition(State::collapsed());
                }
                Handled
            }
            // Already heading to rest.
            ExpandHsmEvent::SmoothReset { .. } => Handled,
            ExpandHsmEvent::LongPress { .. } | ExpandHsmEvent::Activity { .. } => Handled,
            _ => Super,
        }
    }

    #[superstate]
    fn running(
        &mut self,
        context: &mut DispatchContext,
        event: &ExpandHsmEvent,
    ) -> Outcome<State> {
        match event {
            ExpandHsmEvent::TouchDown => {
                self.touching = true;
                self.auto_return.cancel();
                Handled
            }
            ExpandHsmEvent::Release { .. } => {
                self.touching = false;
                Handled
            }
            ExpandHsmEvent::ForceReset => {
                self.anim = None;
                self.auto_return.cancel();
                self.progress = Fx::ZERO;
                self.state_id = ExpandStateId::Collapsed;
                context.emit(ExpandSignal::Progress(Fx::ZERO));
                context.emit(ExpandSignal::Left);
                Transition(State::collapsed())
            }
            _ => Handled,
        }
    }
}
