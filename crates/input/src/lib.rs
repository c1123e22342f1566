//! Keyboard input layer.
//!
//! Maps crossterm key events onto the core's discrete [`Command`]s — one
//! command per physical key transition, no buffering — and provides the
//! [`DropLatch`] hold tracker for terminals without key-release events.
//!
//! [`Command`]: gridfall_types::Command

pub mod latch;
pub mod map;

pub use gridfall_types as types;

pub use latch::{DropLatch, DROP_HOLD_TIMEOUT_MS};
pub use map::{map_key_press, map_key_release, should_quit};
