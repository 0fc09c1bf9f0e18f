//! Core game logic module - deterministic and host-independent
//!
//! This crate contains the game rules and the state machine that applies them.
//! It has no terminal, async or I/O dependencies: painting, score display and
//! the gravity driver are reached through the traits in [`surface`], so the
//! same machine runs under the terminal host, in tests and in benches.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven-variant catalog and fixed-pivot bitmap rotation
//! - [`levels`]: gravity delay per level
//! - [`board`]: 10x20 locked-cell matrix with line clearing
//! - [`piece`]: falling piece placement, collision and kicked rotation
//! - [`rng`]: seeded bag randomizer
//! - [`scoring`]: placement points, line bonuses, level progression
//! - [`surface`]: collaborator contracts (paint, score, timer)
//! - [`timer`]: a polled [`surface::GravityTimer`]
//! - [`game_state`]: the tick-driven state machine
//!
//! # Game Rules
//!
//! - **Bag Randomizer**: one of each variant per shuffled bag
//! - **Gravity**: a 50ms driver checks elapsed time against the level delay
//!   (500ms at level 1 down to 50ms at level 10)
//! - **Rotation**: clockwise about the bitmap centre, kicks right, left, then up;
//!   only allowed after the piece has fallen at least once
//! - **Hard Drop**: locks immediately for double placement points
//! - **Scoring**: `10 x level` per lock (`20 x level` hard drop) plus
//!   `{100, 300, 500, 800} x level` for 1-4 lines
//! - **Levels**: one per 10 lines, capped at 10
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use gridfall_core::{GameState, MachineState, PollTimer};
//! # use gridfall_core::surface::{PaintError, PaintSurface, ScoreSurface};
//! # use gridfall_core::types::Rgb;
//! # struct Null(u16, u16);
//! # impl PaintSurface for Null {
//! #     fn cols(&self) -> u16 { self.0 }
//! #     fn rows(&self) -> u16 { self.1 }
//! #     fn paint_cell(&mut self, _: i32, _: i32, _: Option<Rgb>) -> Result<(), PaintError> {
//! #         Ok(())
//! #     }
//! # }
//! # #[derive(Default)] struct Score(u32, String);
//! # impl ScoreSurface for Score {
//! #     fn value(&self) -> u32 { self.0 }
//! #     fn set_value(&mut self, v: u32) { self.0 = v }
//! #     fn format(&self) -> &str { &self.1 }
//! #     fn set_format(&mut self, f: &str) { self.1 = f.to_string() }
//! # }
//!
//! let mut game = GameState::new(Null(10, 20), Null(4, 4), Score::default(), PollTimer::new(), 7);
//! game.start();
//! game.on_timer(Instant::now());
//! assert_eq!(game.state(), MachineState::Playing);
//!
//! game.on_key_down("Space");
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod board;
pub mod game_state;
pub mod levels;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod surface;
pub mod timer;

pub use gridfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use game_state::{GameState, TICK_PERIOD};
pub use levels::{clamp_level, delay_for_level};
pub use piece::FallingPiece;
pub use pieces::{variant, Variant, CATALOG};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{level_for_lines, line_clear_points, lock_points};
pub use surface::{GravityTimer, PaintError, PaintSurface, ScoreSurface};
pub use timer::PollTimer;
pub use types::{GameEvent, GameNotice, LockKind, MachineState, PieceKind};
