//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! Everything here is plain data: dimensions, timing and scoring tables,
//! the piece identifiers, the event vocabulary of the state machine, key
//! identifiers and the color type shared by the core and the terminal layer.

pub mod color;

pub use color::{css, ColorParseError, Rgb};

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Next-piece preview dimensions
pub const PREVIEW_WIDTH: u8 = 4;
pub const PREVIEW_HEIGHT: u8 = 4;

/// Side length of every piece bitmap in the catalog
pub const SHAPE_SIZE: usize = 4;

/// Period of the external gravity driver (milliseconds).
///
/// This is the UI refresh cadence, not the gravity speed; see [`LEVEL_DELAYS_MS`].
pub const TICK_MS: u32 = 50;

/// Level range
pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 10;

/// Gravity delay per level (index 0 is level 1), in milliseconds
pub const LEVEL_DELAYS_MS: [u32; 10] = [500, 450, 400, 350, 300, 250, 200, 150, 100, 50];

/// Cumulative lines needed for each level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear bonus by number of lines cleared in one lock (multiplied by level)
pub const LINE_CLEAR_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// Placement points for a gravity lock (multiplied by level)
pub const LOCK_POINTS: u32 = 10;

/// Placement points for a hard-drop lock (multiplied by level)
pub const HARD_DROP_LOCK_POINTS: u32 = 20;

/// Container identifiers
pub const PLAYFIELD_ID: &str = "playfield";
pub const NEXT_ID: &str = "next";
pub const SCORE_ID: &str = "score";

/// Score display formats
pub const SCORE_FORMAT: &str = "Score: {value}";
pub const GAME_OVER_FORMAT: &str = "Game over!\nScore: {value}";

/// Surface backgrounds
pub const PLAYFIELD_BACKGROUND: Rgb = Rgb::new(50, 75, 100);
/// hsl(90,30%,20%)
pub const NEXT_BACKGROUND: Rgb = Rgb::new(51, 66, 36);

/// Tetromino piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "O",
            PieceKind::I => "I",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::T => "T",
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Events dispatched to the current state's handler.
///
/// `PieceLocked` and `GameOver` are raised internally; the rest come from
/// the gravity driver or from key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Tick,
    MoveLeft,
    MoveRight,
    Rotate,
    HardDrop,
    PieceLocked,
    GameOver,
}

impl GameEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Tick => "tick",
            GameEvent::MoveLeft => "moveLeft",
            GameEvent::MoveRight => "moveRight",
            GameEvent::Rotate => "rotate",
            GameEvent::HardDrop => "hardDrop",
            GameEvent::PieceLocked => "pieceLocked",
            GameEvent::GameOver => "gameOver",
        }
    }
}

/// States of the game state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    Playing,
    SpawnDelay,
    GameOver,
}

impl MachineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineState::Playing => "playing",
            MachineState::SpawnDelay => "spawnDelay",
            MachineState::GameOver => "gameOver",
        }
    }
}

/// How a piece came to rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockKind {
    Gravity,
    HardDrop,
    /// Forced lock performed while finalizing game over
    Final,
}

impl LockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockKind::Gravity => "gravity",
            LockKind::HardDrop => "hardDrop",
            LockKind::Final => "final",
        }
    }
}

/// Something that happened inside the state machine (consumed by observers/logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameNotice {
    Spawned {
        kind: PieceKind,
        x: i8,
        y: i8,
    },
    Locked {
        kind: PieceKind,
        lock: LockKind,
        points: u32,
    },
    LinesCleared {
        count: u32,
        points: u32,
        total_lines: u32,
    },
    LevelChanged {
        level: u32,
        delay_ms: u32,
    },
    GameOver {
        score: u32,
        lines: u32,
        level: u32,
    },
}

/// Key identifiers (DOM `KeyboardEvent.code` vocabulary)
pub mod keys {
    pub const ARROW_LEFT: &str = "ArrowLeft";
    pub const ARROW_RIGHT: &str = "ArrowRight";
    pub const ARROW_UP: &str = "ArrowUp";
    pub const ARROW_DOWN: &str = "ArrowDown";
    pub const SPACE: &str = "Space";
    pub const ENTER: &str = "Enter";
    pub const ESCAPE: &str = "Escape";
    pub const TAB: &str = "Tab";
    pub const BACKSPACE: &str = "Backspace";
}
