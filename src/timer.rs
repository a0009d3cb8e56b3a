//! Single-shot timer slots, polled against the host clock.
//!
//! The core is never called back: deadlines live in plain state and are
//! checked on `fire_due`. Cancelling clears the deadline, so a cancelled
//! timer cannot fire late, and a fired slot disarms itself.

#[derive(Clone, Copy, Debug, Default)]
pub struct TimerSlot {
    deadline_ms: Option<u64>,
}

impl TimerSlot {
    pub const fn new() -> Self {
        Self { deadline_ms: None }
    }

    /// Arms the slot, replacing any pending deadline.
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Returns true once when the deadline has passed, then disarms.
    pub fn fire_due(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
