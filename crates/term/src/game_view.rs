//! GameView: draws the painted surfaces into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::surface::PaintSurface;
use crate::fb::{CellStyle, FrameBuffer};
use crate::grid::GridPainter;
use crate::layout::{Layout, LayoutError, Rect, Viewport, CELL_H, CELL_W};
use crate::score::ScoreDisplay;
use crate::types::Rgb;

const HINTS: [&str; 5] = [
    "<- -> move",
    "^     rotate",
    "space drop",
    "r     new game",
    "q     quit",
];

/// Renders the playfield, next preview and score panel.
pub struct GameView {
    border: CellStyle,
    title: CellStyle,
    text: CellStyle,
    hint: CellStyle,
}

impl Default for GameView {
    fn default() -> Self {
        let black = Rgb::new(0, 0, 0);
        Self {
            border: CellStyle::new(Rgb::new(200, 200, 200), black),
            title: CellStyle::new(Rgb::new(220, 220, 220), black).bold(),
            text: CellStyle::new(Rgb::new(220, 220, 220), black),
            hint: CellStyle::new(Rgb::new(120, 120, 130), black),
        }
    }
}

impl GameView {
    /// Render every container into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// layout's viewport.
    pub fn render_into(
        &self,
        layout: &Layout,
        playfield: &GridPainter,
        next: &GridPainter,
        score: &ScoreDisplay,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(layout.viewport.width, layout.viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        self.draw_grid(fb, layout.playfield, playfield, None);
        self.draw_grid(fb, layout.next, next, Some("NEXT"));
        self.draw_panel(fb, layout.score, score);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        layout: &Layout,
        playfield: &GridPainter,
        next: &GridPainter,
        score: &ScoreDisplay,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(layout.viewport.width, layout.viewport.height);
        self.render_into(layout, playfield, next, score, &mut fb);
        fb
    }

    /// Notice shown while the containers do not fit the terminal
    pub fn render_too_small(&self, viewport: Viewport, err: &LayoutError, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let LayoutError::ContainerNotFound { need_w, need_h, .. } = *err;
        let needed = format!("need {need_w}x{need_h}");
        let lines = ["Terminal too small", needed.as_str()];
        let top = viewport.height.saturating_sub(lines.len() as u16) / 2;
        for (i, line) in lines.iter().enumerate() {
            let w = line.chars().count() as u16;
            let x = viewport.width.saturating_sub(w) / 2;
            fb.put_str(x, top + i as u16, line, self.text);
        }
    }

    fn draw_grid(
        &self,
        fb: &mut FrameBuffer,
        frame: Rect,
        grid: &GridPainter,
        title: Option<&str>,
    ) {
        self.draw_border(fb, frame);
        if let Some(title) = title {
            fb.put_str(frame.x + 2, frame.y, title, self.title);
        }

        let inner = frame.inner();
        for y in 0..grid.rows() {
            for x in 0..grid.cols() {
                let Some(color) = grid.color_at(x, y) else {
                    continue;
                };
                fb.fill_rect(
                    inner.x + x * CELL_W,
                    inner.y + y * CELL_H,
                    CELL_W,
                    CELL_H,
                    ' ',
                    CellStyle::solid(color),
                );
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, area: Rect, score: &ScoreDisplay) {
        let mut y = area.y;
        let bottom = area.y.saturating_add(area.h);
        for line in score.lines() {
            if y >= bottom {
                return;
            }
            fb.put_str(area.x, y, line, self.text);
            y += 1;
        }

        // Hints go to the bottom of the panel when there is room for all of them.
        let hints_top = bottom.saturating_sub(HINTS.len() as u16);
        if hints_top > y {
            for (i, hint) in HINTS.iter().enumerate() {
                fb.put_str(area.x, hints_top + i as u16, hint, self.hint);
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Rect) {
        let Rect { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }
        let style = self.border;

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::ScoreSurface;
    use crate::types::{GAME_OVER_FORMAT, PLAYFIELD_BACKGROUND, SCORE_FORMAT};

    fn surfaces() -> (GridPainter, GridPainter, ScoreDisplay) {
        (
            GridPainter::new("playfield", 10, 20, PLAYFIELD_BACKGROUND),
            GridPainter::new("next", 4, 4, Rgb::new(51, 66, 36)),
            ScoreDisplay::new("score", 0, SCORE_FORMAT),
        )
    }

    #[test]
    fn test_painted_cell_is_two_columns_wide() {
        let (mut playfield, next, score) = surfaces();
        let red = Rgb::new(255, 0, 0);
        playfield.paint_cell(0, 19, Some(red)).unwrap();

        let layout = Layout::locate(Viewport::new(80, 24)).unwrap();
        let fb = GameView::default().render(&layout, &playfield, &next, &score);

        let inner = layout.playfield.inner();
        let row = inner.y + 19;
        assert_eq!(fb.get(inner.x, row).unwrap().style.bg, red);
        assert_eq!(fb.get(inner.x + 1, row).unwrap().style.bg, red);
        assert_eq!(fb.get(inner.x + 2, row).unwrap().style.bg, PLAYFIELD_BACKGROUND);
    }

    #[test]
    fn test_border_and_title() {
        let (playfield, next, score) = surfaces();
        let layout = Layout::locate(Viewport::new(80, 24)).unwrap();
        let fb = GameView::default().render(&layout, &playfield, &next, &score);

        let p = layout.playfield;
        assert_eq!(fb.get(p.x, p.y).unwrap().ch, '┌');
        assert_eq!(fb.get(p.x + p.w - 1, p.y + p.h - 1).unwrap().ch, '┘');
        assert!(fb.row_text(layout.next.y).contains("NEXT"));
    }

    #[test]
    fn test_score_lines_are_drawn() {
        let (playfield, next, mut score) = surfaces();
        score.set_value(40);
        score.set_format(GAME_OVER_FORMAT);
        let layout = Layout::locate(Viewport::new(80, 24)).unwrap();
        let fb = GameView::default().render(&layout, &playfield, &next, &score);

        assert!(fb.row_text(layout.score.y).contains("Game over!"));
        assert!(fb.row_text(layout.score.y + 1).contains("Score: 40"));
    }

    #[test]
    fn test_too_small_notice() {
        let viewport = Viewport::new(30, 10);
        let err = Layout::locate(viewport).unwrap_err();
        let mut fb = FrameBuffer::new(1, 1);
        GameView::default().render_too_small(viewport, &err, &mut fb);
        assert_eq!(fb.width(), 30);
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("Terminal too small"));
    }
}
