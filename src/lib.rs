//! Interaction core for a pop-out touch volume dial.
//!
//! The crate is host-driven and allocation-free: the host feeds pointer
//! samples and a monotonic millisecond clock in, and drains a bounded buffer
//! of typed actions back out. Two components carry the logic: the gesture
//! classifier ([`gesture::GestureEngine`]) turns the raw pointer stream into
//! committed gestures, and the dial controller ([`dial::DialController`])
//! owns the value, the expand-mode state machine and the haptic policy.
//! [`pipeline::Dial`] wires the two together behind a single facade.
//!
//! Rendering, window lifecycle, persisted settings and system-volume I/O
//! stay on the host side; the core only emits intents.

#![cfg_attr(not(test), no_std)]

pub mod anim;
pub mod config;
pub mod dial;
pub mod events;
pub mod geom;
pub mod gesture;
pub mod pipeline;
pub mod timer;

use fixed::types::I16F16;

/// Fixed-point scalar used for sensitivity, easing and animation progress.
pub type Fx = I16F16;

pub use config::{DialConfig, HapticStrength};
pub use events::{DialAction, DialOutput, HapticKind, HapticPulse};
pub use pipeline::Dial;
