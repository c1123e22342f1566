//! Terminal rendering layer.
//!
//! Deliberately not a TUI widget framework: the game view fills a plain
//! character-cell framebuffer, and a small crossterm backend flushes it. The
//! simulation core stays headless — this crate only ever reads it.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use gridfall_core as core;
pub use gridfall_types as types;

pub use fb::{FrameBuffer, TermCell};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
