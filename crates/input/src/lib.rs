//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! codes to key identifiers and tracks which keys are held, suppressing
//! duplicate presses (including on terminals without key-release events).

pub mod input;
pub mod map;

pub use gridfall_types as types;

pub use input::{Input, KeyListener, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
pub use map::{is_restart, key_id, should_quit};
