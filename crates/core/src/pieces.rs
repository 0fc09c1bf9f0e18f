//! Pieces module - the piece catalog and its rotation geometry
//!
//! Every variant is a 4x4 bitmap. Rotation is computed generically: each
//! quarter turn maps bitmap cell `(x, y)` to `(3 - y, x)`, i.e. a clockwise turn
//! around the fixed centre of the bitmap rather than the shape's own centroid.
//! Kicks elsewhere depend on the exact offsets this produces.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rgb, SHAPE_SIZE};

/// Offset of a single cell relative to the piece origin (top-left of the bitmap)
pub type MinoOffset = (i8, i8);

/// Occupied cells of a piece in one orientation
pub type PieceCells = ArrayVec<MinoOffset, { SHAPE_SIZE * SHAPE_SIZE }>;

/// Square bitmap, row-major (`shape[y][x]`)
pub type Shape = [[u8; SHAPE_SIZE]; SHAPE_SIZE];

/// Immutable catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Rgb,
    /// Number of distinct rotation states
    pub rotations: u8,
    /// Upper bound on lines one lock of this variant can complete
    pub max_lines: u8,
}

/// The seven variants, indexed by [`PieceKind::index`]
pub const CATALOG: [Variant; 7] = [
    Variant {
        kind: PieceKind::O,
        shape: [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        color: Rgb::new(255, 255, 0),
        rotations: 1,
        max_lines: 2,
    },
    Variant {
        kind: PieceKind::I,
        shape: [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
        color: Rgb::new(0, 255, 255),
        rotations: 2,
        max_lines: 4,
    },
    Variant {
        kind: PieceKind::S,
        shape: [[0, 0, 0, 0], [0, 0, 1, 1], [0, 1, 1, 0], [0, 0, 0, 0]],
        color: Rgb::new(0, 255, 0),
        rotations: 2,
        max_lines: 2,
    },
    Variant {
        kind: PieceKind::Z,
        shape: [[0, 0, 0, 0], [0, 1, 1, 0], [0, 0, 1, 1], [0, 0, 0, 0]],
        color: Rgb::new(255, 0, 0),
        rotations: 2,
        max_lines: 2,
    },
    Variant {
        kind: PieceKind::L,
        shape: [[0, 0, 0, 0], [0, 1, 1, 1], [0, 1, 0, 0], [0, 0, 0, 0]],
        color: Rgb::new(255, 165, 0),
        rotations: 4,
        max_lines: 3,
    },
    Variant {
        kind: PieceKind::J,
        shape: [[0, 0, 0, 0], [0, 1, 1, 1], [0, 0, 0, 1], [0, 0, 0, 0]],
        color: Rgb::new(81, 81, 255),
        rotations: 4,
        max_lines: 3,
    },
    Variant {
        kind: PieceKind::T,
        shape: [[0, 0, 0, 0], [0, 1, 1, 1], [0, 0, 1, 0], [0, 0, 0, 0]],
        color: Rgb::new(208, 28, 208),
        rotations: 4,
        max_lines: 2,
    },
];

/// Look up the catalog entry for a piece kind
pub fn variant(kind: PieceKind) -> &'static Variant {
    &CATALOG[kind.index()]
}

/// Rotate a bitmap cell one quarter turn clockwise
#[inline(always)]
fn rotate_cw((x, y): MinoOffset) -> MinoOffset {
    (SHAPE_SIZE as i8 - 1 - y, x)
}

/// Occupied cells of `kind` after `rotation` quarter turns.
///
/// `rotation` is taken modulo the variant's rotation count, so an index past
/// the last orientation wraps around to the base shape.
pub fn cells(kind: PieceKind, rotation: u8) -> PieceCells {
    let v = variant(kind);
    let turns = rotation % v.rotations.max(1);

    let mut out = PieceCells::new();
    for (y, row) in v.shape.iter().enumerate() {
        for (x, &bit) in row.iter().enumerate() {
            if bit == 0 {
                continue;
            }
            let mut cell = (x as i8, y as i8);
            for _ in 0..turns {
                cell = rotate_cw(cell);
            }
            out.push(cell);
        }
    }
    out
}

/// Number of bitmap rows the base shape occupies
pub fn height(kind: PieceKind) -> i8 {
    let shape = &variant(kind).shape;
    let mut rows = shape
        .iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|&bit| bit != 0))
        .map(|(y, _)| y as i8);
    match rows.next() {
        Some(top) => rows.last().unwrap_or(top) - top + 1,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_indexed_by_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(variant(kind).kind, kind);
        }
    }

    #[test]
    fn test_every_variant_has_four_cells() {
        for kind in PieceKind::ALL {
            for r in 0..variant(kind).rotations {
                assert_eq!(cells(kind, r).len(), 4, "{:?} rotation {}", kind, r);
            }
        }
    }

    #[test]
    fn test_o_rotation_is_fixed_point() {
        let mut base = cells(PieceKind::O, 0);
        base.sort();
        let mut turned: PieceCells = cells(PieceKind::O, 0)
            .into_iter()
            .map(rotate_cw)
            .collect();
        turned.sort();
        assert_eq!(base, turned);
    }

    #[test]
    fn test_i_rotates_into_column_two() {
        let vertical = cells(PieceKind::I, 1);
        assert!(vertical.iter().all(|&(x, _)| x == 2));
        let mut ys: Vec<i8> = vertical.iter().map(|&(_, y)| y).collect();
        ys.sort();
        assert_eq!(ys, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rotation_index_wraps_at_rotation_count() {
        for kind in PieceKind::ALL {
            let n = variant(kind).rotations;
            assert_eq!(cells(kind, n), cells(kind, 0));
        }
    }

    #[test]
    fn test_heights() {
        assert_eq!(height(PieceKind::I), 1);
        assert_eq!(height(PieceKind::O), 2);
        assert_eq!(height(PieceKind::T), 2);
    }
}
