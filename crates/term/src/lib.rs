//! Terminal host layer.
//!
//! Terminal implementations of the core's paint and score surfaces, the
//! container layout, and a small game-oriented renderer: surfaces are drawn
//! into a framebuffer that is diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep drawing pure (framebuffer in, framebuffer out) so it can be unit-tested
//! - Control the aspect ratio (2 columns per grid cell)

pub mod fb;
pub mod game_view;
pub mod grid;
pub mod layout;
pub mod renderer;
pub mod score;

pub use gridfall_core as core;
pub use gridfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::GameView;
pub use grid::GridPainter;
pub use layout::{Layout, LayoutError, Rect, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use score::ScoreDisplay;
