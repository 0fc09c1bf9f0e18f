//! Board module - the locked cells of the playfield
//!
//! The board is a 10x20 grid where each cell is empty (background) or holds the
//! kind of the piece that was locked there. Uses a flat array, row-major.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the top (negative y) are not part of the board.

use crate::pieces::MinoOffset;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Cell on the board (None = background, Some = locked piece kind)
pub type Cell = Option<PieceKind>;

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;
const BOARD_SIZE: usize = WIDTH * HEIGHT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y), or None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True if (x, y) is on the board and holds a locked cell
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// A row is complete when none of its cells is background
    pub fn is_line_complete(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(Option::is_some)
    }

    /// Remove row `y`: every row above shifts down by one and the top row is cleared
    pub fn remove_line(&mut self, y: usize) {
        if y >= HEIGHT {
            return;
        }
        self.cells.copy_within(0..y * WIDTH, WIDTH);
        self.cells[..WIDTH].fill(None);
    }

    /// Clear complete rows scanning bottom to top, stopping after `limit` rows.
    ///
    /// After a removal the same row index is examined again, since the row
    /// above has just shifted into it. Returns the number of rows removed.
    pub fn clear_complete_lines(&mut self, limit: usize) -> usize {
        let mut cleared = 0;
        let mut y = HEIGHT;
        while y > 0 && cleared < limit {
            if self.is_line_complete(y - 1) {
                self.remove_line(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Write `kind` into every on-board cell of a piece at origin (x, y).
    ///
    /// Cells outside the board are skipped. Returns how many cells were written.
    pub fn stamp(&mut self, cells: &[MinoOffset], x: i8, y: i8, kind: PieceKind) -> usize {
        cells
            .iter()
            .filter(|&&(dx, dy)| self.set(x + dx, y + dy, Some(kind)))
            .count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// `.` is background; a piece letter locks that kind; any other
    /// non-space character locks an `I` cell.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, row) in rows.iter().enumerate().take(HEIGHT) {
            for (x, ch) in row.chars().filter(|c| !c.is_whitespace()).enumerate().take(WIDTH) {
                if ch == '.' {
                    continue;
                }
                let kind = PieceKind::from_str(&ch.to_string()).unwrap_or(PieceKind::I);
                board.set(x as i8, (offset + i) as i8, Some(kind));
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(0, -1), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_remove_line_shifts_rows_down() {
        let mut board = Board::new();
        board.set(4, 17, Some(PieceKind::T));
        board.set(0, 0, Some(PieceKind::S));
        for x in 0..10 {
            board.set(x, 18, Some(PieceKind::I));
        }

        board.remove_line(18);

        assert_eq!(board.get(4, 18), Some(Some(PieceKind::T)));
        assert_eq!(board.get(4, 17), Some(None));
        assert_eq!(board.get(0, 1), Some(Some(PieceKind::S)));
        assert!(board.row(0).iter().all(Option::is_none));
    }

    #[test]
    fn test_clear_reexamines_shifted_row() {
        let mut board = Board::from_ascii(&[
            "IIIIIIIIII", //
            "IIIIIIIIII",
        ]);
        assert_eq!(board.clear_complete_lines(4), 2);
        assert!(board.cells().iter().all(Option::is_none));
    }

    #[test]
    fn test_clear_stops_at_limit() {
        let mut board = Board::from_ascii(&[
            "IIIIIIIIII", //
            "IIIIIIIIII",
            "IIIIIIIIII",
        ]);
        assert_eq!(board.clear_complete_lines(2), 2);
        assert!(board.is_line_complete(19));
        assert!(!board.is_line_complete(18));
    }

    #[test]
    fn test_clear_skips_incomplete_rows() {
        let mut board = Board::from_ascii(&[
            "IIIIIIIIII", //
            "IIIII.IIII",
            "IIIIIIIIII",
        ]);
        assert_eq!(board.clear_complete_lines(4), 2);
        assert!(!board.is_line_complete(19));
        assert_eq!(board.get(5, 19), Some(None));
        assert!(board.row(18).iter().all(Option::is_none));
    }

    #[test]
    fn test_stamp_skips_cells_above_the_board() {
        let mut board = Board::new();
        let written = board.stamp(&[(0, 0), (0, 1), (0, 2)], 4, -1, PieceKind::L);
        assert_eq!(written, 2);
        assert!(board.is_occupied(4, 0));
        assert!(board.is_occupied(4, 1));
    }

    #[test]
    fn test_from_ascii_is_bottom_aligned() {
        let board = Board::from_ascii(&["T........O"]);
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(9, 19), Some(Some(PieceKind::O)));
        assert_eq!(board.get(1, 19), Some(None));
    }
}
