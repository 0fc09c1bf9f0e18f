//! Container layout: where the playfield, preview and score live on screen.
//!
//! A terminal has no DOM to look containers up in, so "locating" a container
//! means finding room for it in the current viewport. Each grid cell is drawn
//! `CELL_W` columns wide to compensate for the usual glyph aspect ratio.

use thiserror::Error;

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, NEXT_ID, PLAYFIELD_ID, PREVIEW_HEIGHT, PREVIEW_WIDTH};

/// Terminal columns per grid cell
pub const CELL_W: u16 = 2;
/// Terminal rows per grid cell
pub const CELL_H: u16 = 1;

/// Columns between the playfield frame and the side panel
const GAP: u16 = 2;
/// Minimum side-panel width (fits "Score: 9999999")
const PANEL_MIN_W: u16 = 14;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// The rect shrunk by a one-cell border on every side
    pub fn inner(&self) -> Rect {
        Rect::new(
            self.x.saturating_add(1),
            self.y.saturating_add(1),
            self.w.saturating_sub(2),
            self.h.saturating_sub(2),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{id} container not found: needs {need_w}x{need_h}, terminal is {viewport_w}x{viewport_h}")]
    ContainerNotFound {
        id: &'static str,
        need_w: u16,
        need_h: u16,
        viewport_w: u16,
        viewport_h: u16,
    },
}

/// Frames (borders included) of the three containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub viewport: Viewport,
    pub playfield: Rect,
    pub next: Rect,
    pub score: Rect,
}

/// Frame size of a grid container with `cols` x `rows` cells
fn frame_size(cols: u8, rows: u8) -> (u16, u16) {
    (cols as u16 * CELL_W + 2, rows as u16 * CELL_H + 2)
}

impl Layout {
    /// Smallest viewport that holds every container
    pub fn min_size() -> (u16, u16) {
        let (pw, ph) = frame_size(BOARD_WIDTH, BOARD_HEIGHT);
        let (nw, nh) = frame_size(PREVIEW_WIDTH, PREVIEW_HEIGHT);
        (pw + GAP + nw.max(PANEL_MIN_W), ph.max(nh + 2))
    }

    /// Center the containers in `viewport`.
    ///
    /// Fails with the id of the first container that does not fit.
    pub fn locate(viewport: Viewport) -> Result<Self, LayoutError> {
        let (pw, ph) = frame_size(BOARD_WIDTH, BOARD_HEIGHT);
        let (nw, nh) = frame_size(PREVIEW_WIDTH, PREVIEW_HEIGHT);
        let (min_w, min_h) = Self::min_size();

        let not_found = |id, need_w, need_h| LayoutError::ContainerNotFound {
            id,
            need_w,
            need_h,
            viewport_w: viewport.width,
            viewport_h: viewport.height,
        };
        if viewport.width < pw || viewport.height < ph {
            return Err(not_found(PLAYFIELD_ID, pw, ph));
        }
        if viewport.width < min_w || viewport.height < min_h {
            return Err(not_found(NEXT_ID, min_w, min_h));
        }

        let x = (viewport.width - min_w) / 2;
        let y = (viewport.height - min_h) / 2;
        let panel_x = x + pw + GAP;
        let panel_w = min_w - pw - GAP;
        let score_y = y + nh + 1;

        Ok(Self {
            viewport,
            playfield: Rect::new(x, y, pw, ph),
            next: Rect::new(panel_x, y, nw, nh),
            score: Rect::new(panel_x, score_y, panel_w, (y + min_h).saturating_sub(score_y)),
        })
    }
}
