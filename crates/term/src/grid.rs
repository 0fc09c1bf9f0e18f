//! GridPainter: a paintable cell matrix backing the playfield and preview.
//!
//! Holds one color per cell; [`crate::GameView`] draws it into the framebuffer.

use crate::core::surface::{check_bounds, PaintError, PaintSurface};
use crate::types::Rgb;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPainter {
    id: String,
    cols: u16,
    rows: u16,
    background: Rgb,
    cells: Vec<Rgb>,
}

impl GridPainter {
    /// A `cols` x `rows` grid with every cell set to `background`.
    ///
    /// Zero dimensions are raised to one.
    pub fn new(id: impl Into<String>, cols: u16, rows: u16, background: Rgb) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            id: id.into(),
            cols,
            rows,
            background,
            cells: vec![background; cols as usize * rows as usize],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Displayed color of a cell, or None outside the grid
    pub fn color_at(&self, x: u16, y: u16) -> Option<Rgb> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(self.cells[y as usize * self.cols as usize + x as usize])
    }

    /// Reset every cell to the background
    pub fn clear(&mut self) {
        self.cells.fill(self.background);
    }
}

impl PaintSurface for GridPainter {
    fn cols(&self) -> u16 {
        self.cols
    }

    fn rows(&self) -> u16 {
        self.rows
    }

    fn paint_cell(&mut self, x: i32, y: i32, color: Option<Rgb>) -> Result<(), PaintError> {
        let (x, y) = check_bounds(x, y, self.cols, self.rows)?;
        self.cells[y * self.cols as usize + x] = color.unwrap_or(self.background);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::Axis;

    #[test]
    fn test_new_grid_is_background() {
        let grid = GridPainter::new("next", 4, 4, Rgb::new(1, 2, 3));
        assert_eq!(grid.id(), "next");
        assert_eq!(grid.color_at(3, 3), Some(Rgb::new(1, 2, 3)));
        assert_eq!(grid.color_at(4, 0), None);
    }

    #[test]
    fn test_paint_and_reset() {
        let bg = Rgb::new(50, 75, 100);
        let mut grid = GridPainter::new("playfield", 10, 20, bg);
        grid.paint_cell(2, 4, Some(Rgb::new(255, 0, 0))).unwrap();
        assert_eq!(grid.color_at(2, 4), Some(Rgb::new(255, 0, 0)));
        grid.paint_cell(2, 4, None).unwrap();
        assert_eq!(grid.color_at(2, 4), Some(bg));
    }

    #[test]
    fn test_paint_css_colors() {
        let mut grid = GridPainter::new("playfield", 10, 20, Rgb::default());
        grid.paint_cell_css(2, 2, Some("#ace")).unwrap();
        assert_eq!(grid.color_at(2, 2), Some(Rgb::new(0xaa, 0xcc, 0xee)));
        grid.paint_cell_css(2, 8, Some("rgb(217,92,91)")).unwrap();
        assert_eq!(grid.color_at(2, 8), Some(Rgb::new(217, 92, 91)));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut grid = GridPainter::new("playfield", 10, 20, Rgb::default());
        assert_eq!(
            grid.paint_cell(10, 0, None),
            Err(PaintError::OutOfRange {
                axis: Axis::X,
                value: 10,
                limit: 10
            })
        );
        assert!(matches!(
            grid.paint_cell(0, -1, None),
            Err(PaintError::OutOfRange { axis: Axis::Y, .. })
        ));
    }
}
