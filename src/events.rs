//! Actions the core hands back to the host, collected per input call in a
//! bounded buffer.

use crate::Fx;

/// One vibration request: duration and amplitude as the platform motor
/// expects them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HapticPulse {
    pub duration_ms: u16,
    pub amplitude: u8,
}

/// What triggered a haptic request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HapticKind {
    /// The authoritative value changed (drag step or external change).
    ValueTick,
    /// Expand mode engaged via long-press.
    ExpandPop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialAction {
    /// Authoritative value changed; the host mirrors it to the system volume.
    ValueChanged(u8),
    /// A touch session opened inside the dial.
    InteractionStart,
    /// The touch session ended (up, cancel, or escape).
    InteractionEnd,
    /// A down landed outside the dial; the host should dismiss the overlay.
    DismissRequested,
    /// Rightward slide: the host should hand off to its secondary surface.
    EscapeRequested,
    /// Expand animation progress in [0, 1] for the renderer.
    ExpandProgress(Fx),
    /// Expanded mode engaged (true) or fully collapsed (false).
    ExpandModeChanged(bool),
    /// Fire the vibration motor.
    HapticRequested { kind: HapticKind, pulse: HapticPulse },
    /// Haptic backend is down; surface feedback some other way.
    FeedbackFallback,
}

const OUTPUT_CAPACITY: usize = 8;

/// Bounded action buffer returned from every facade call. Capacity covers
/// the worst single-call burst; overflow drops the action and warns.
#[derive(Clone, Debug, Default)]
pub struct DialOutput {
    actions: heapless::Vec<DialAction, OUTPUT_CAPACITY>,
}

impl DialOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, action: DialAction) {
        if self.actions.push(action).is_err() {
            log::warn!("dial output overflow, dropping {action:?}");
        }
    }

    pub fn actions(&self) -> &[DialAction] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, DialAction> {
        self.actions.iter()
    }
}

impl<'a> IntoIterator for &'a DialOutput {
    type Item = &'a DialAction;
    type IntoIter = core::slice::Iter<'a, DialAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
