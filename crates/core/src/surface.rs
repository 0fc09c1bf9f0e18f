//! Collaborator contracts - what the state machine needs from its host
//!
//! The core never owns a screen or a clock. It paints through [`PaintSurface`],
//! reports score through [`ScoreSurface`] and starts/stops gravity through
//! [`GravityTimer`]. Hosts (the terminal layer, tests, benches) supply the
//! implementations.

use std::time::Duration;

use thiserror::Error;

use crate::types::{ColorParseError, Rgb};

/// Axis of an out-of-range paint request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// Paint contract violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaintError {
    #[error("{axis} coordinate {value} out of range 0..{limit}")]
    OutOfRange { axis: Axis, value: i32, limit: u16 },
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),
}

/// A fixed-size grid of colored cells
pub trait PaintSurface {
    fn cols(&self) -> u16;
    fn rows(&self) -> u16;

    /// Set one cell; `None` resets it to the surface background.
    fn paint_cell(&mut self, x: i32, y: i32, color: Option<Rgb>) -> Result<(), PaintError>;

    /// Paint with a CSS-style color string (`rgb(..)`, `hsl(..)`, `#rrggbb`, `red`)
    fn paint_cell_css(&mut self, x: i32, y: i32, color: Option<&str>) -> Result<(), PaintError> {
        let color = color.map(str::parse::<Rgb>).transpose()?;
        self.paint_cell(x, y, color)
    }
}

/// Range check shared by surface implementations
pub fn check_bounds(x: i32, y: i32, cols: u16, rows: u16) -> Result<(usize, usize), PaintError> {
    if x < 0 || x >= i32::from(cols) {
        return Err(PaintError::OutOfRange {
            axis: Axis::X,
            value: x,
            limit: cols,
        });
    }
    if y < 0 || y >= i32::from(rows) {
        return Err(PaintError::OutOfRange {
            axis: Axis::Y,
            value: y,
            limit: rows,
        });
    }
    Ok((x as usize, y as usize))
}

/// A numeric display driven by a `{value}` template
pub trait ScoreSurface {
    fn value(&self) -> u32;
    fn set_value(&mut self, value: u32);
    fn format(&self) -> &str;
    fn set_format(&mut self, format: &str);
}

/// The periodic gravity driver.
///
/// At most one period is live: `start` on a running timer replaces it.
pub trait GravityTimer {
    fn start(&mut self, period: Duration);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}
