//! Falling piece geometry - placement, collision and kicked rotation

use crate::board::Board;
use crate::pieces::{self, PieceCells};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SHAPE_SIZE};

/// Kick offsets tried in order after a colliding rotation:
/// one column right, one column left, then one row up.
pub const KICKS: [(i8, i8); 3] = [(1, 0), (-1, 0), (0, -1)];

/// The piece currently under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub kind: PieceKind,
    /// Board column of the bitmap's left edge
    pub x: i8,
    /// Board row of the bitmap's top edge; negative while partially above the board
    pub y: i8,
    /// Rotation index, `0..rotations`
    pub rotation: u8,
}

impl FallingPiece {
    /// A piece centered horizontally whose occupied rows end at the top board row
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            x: (BOARD_WIDTH as i8 - SHAPE_SIZE as i8) / 2,
            y: -pieces::height(kind),
            rotation: 0,
        }
    }

    /// Occupied cells relative to the origin, in the current rotation
    pub fn cells(&self) -> PieceCells {
        pieces::cells(self.kind, self.rotation)
    }

    /// Occupied cells in board coordinates
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.cells().into_iter().map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Collision test against the board and its side/bottom bounds.
    ///
    /// Cells above the top row only collide with the side walls.
    pub fn collides(&self, board: &Board) -> bool {
        self.board_cells().any(|(x, y)| {
            x < 0
                || x >= BOARD_WIDTH as i8
                || y >= BOARD_HEIGHT as i8
                || (y >= 0 && board.is_occupied(x, y))
        })
    }

    /// True if any occupied cell is still above the board
    pub fn is_above_board(&self) -> bool {
        self.board_cells().any(|(_, y)| y < 0)
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Next rotation state, wrapping at the variant's rotation count
    pub fn turned(&self) -> Self {
        let rotations = pieces::variant(self.kind).rotations.max(1);
        Self {
            rotation: (self.rotation + 1) % rotations,
            ..*self
        }
    }

    /// Rotate one step, trying [`KICKS`] if the plain rotation collides.
    ///
    /// Returns None when every candidate collides; the caller keeps the
    /// unrotated piece in that case.
    pub fn rotated(&self, board: &Board) -> Option<Self> {
        let turned = self.turned();
        if !turned.collides(board) {
            return Some(turned);
        }
        KICKS
            .iter()
            .map(|&(dx, dy)| turned.shifted(dx, dy))
            .find(|candidate| !candidate.collides(board))
    }

    /// Lowest non-colliding position straight below
    pub fn dropped(&self, board: &Board) -> Self {
        let mut piece = *self;
        loop {
            let next = piece.shifted(0, 1);
            if next.collides(board) {
                return piece;
            }
            piece = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_is_centered_with_bottom_row_at_top_of_board() {
        for kind in PieceKind::ALL {
            let piece = FallingPiece::spawn(kind);
            assert_eq!(piece.x, 3);
            let bottom = piece.board_cells().map(|(_, y)| y).max().unwrap();
            assert_eq!(bottom, 0, "{:?}", kind);
        }
    }

    #[test]
    fn test_rows_above_board_do_not_collide() {
        let board = Board::from_ascii(&["IIIIIIIIII"]);
        let piece = FallingPiece {
            kind: PieceKind::I,
            x: 3,
            y: -5,
            rotation: 1,
        };
        assert!(!piece.collides(&board));
    }

    #[test]
    fn test_side_walls_collide_above_board() {
        let board = Board::new();
        let piece = FallingPiece {
            kind: PieceKind::I,
            x: -1,
            y: -3,
            rotation: 0,
        };
        assert!(piece.collides(&board));
    }

    #[test]
    fn test_floor_collides() {
        let board = Board::new();
        let piece = FallingPiece {
            kind: PieceKind::I,
            x: 3,
            y: 19,
            rotation: 0,
        };
        assert!(piece.collides(&board));
        assert!(!piece.shifted(0, -1).collides(&board));
    }

    #[test]
    fn test_collides_is_pure() {
        let board = Board::from_ascii(&["..TT......"]);
        let piece = FallingPiece {
            kind: PieceKind::O,
            x: 1,
            y: 17,
            rotation: 0,
        };
        let first = piece.collides(&board);
        assert_eq!(first, piece.collides(&board));
        assert!(first);
    }

    #[test]
    fn test_turned_wraps() {
        let mut piece = FallingPiece::spawn(PieceKind::T);
        for _ in 0..4 {
            piece = piece.turned();
        }
        assert_eq!(piece, FallingPiece::spawn(PieceKind::T));
    }

    #[test]
    fn test_dropped_rests_on_floor() {
        let board = Board::new();
        let piece = FallingPiece::spawn(PieceKind::I).dropped(&board);
        assert_eq!(piece.y, 18);
        assert!(piece.board_cells().all(|(_, y)| y == 19));
    }
}
