//! Gridfall (workspace facade crate).
//!
//! Re-exports the member crates under stable module names; the
//! implementation lives in dedicated crates under `crates/`.

pub use gridfall_core as core;
pub use gridfall_input as input;
pub use gridfall_term as term;
pub use gridfall_types as types;
