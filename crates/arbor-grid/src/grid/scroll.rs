//! Virtual scroll windowing.
//!
//! [`ScrollWindow`] slices the effective (visible-flagged) row list down to
//! the rows the host should actually render for the current viewport, and
//! derives the spacer heights placed above and below the slice so the scroll
//! geometry matches the full list. The three heights always satisfy
//! `top + rendered + bottom == total`.
//!
//! Horizontal scrolling is a one-way mirror: the header's offset is forced
//! equal to the body's, and only when the offset actually changed.

use super::viewport::Viewport;

/// Which axes a scroll event actually moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollDelta {
    /// The vertical offset changed and the window was recomputed.
    pub vertical: bool,
    /// The horizontal offset changed and the header mirror was updated.
    pub horizontal: bool,
}

/// Vertical window and scroll synchronization state.
#[derive(Debug, Default)]
pub struct ScrollWindow {
    last_top: f32,
    last_left: f32,
    /// Node indices of the currently rendered slice.
    view_rows: Vec<usize>,
    has_vertical_scroll_bar: bool,
    top_spacer: f32,
    bottom_spacer: f32,
    /// Header horizontal offset, mirrored from the body.
    header_left: f32,
}

impl ScrollWindow {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Node indices of the rows the host should render.
    pub fn view_rows(&self) -> &[usize] {
        &self.view_rows
    }

    /// Whether the effective rows overflow the viewport vertically.
    pub fn has_vertical_scroll_bar(&self) -> bool {
        self.has_vertical_scroll_bar
    }

    /// Pixel height of the spacer above the rendered slice.
    pub fn top_spacer_height(&self) -> f32 {
        self.top_spacer
    }

    /// Pixel height of the spacer below the rendered slice.
    pub fn bottom_spacer_height(&self) -> f32 {
        self.bottom_spacer
    }

    /// The header's horizontal scroll offset (mirrors the body).
    pub fn header_scroll_left(&self) -> f32 {
        self.header_left
    }

    /// Recomputes the rendered slice and spacer heights.
    ///
    /// `rows` is the effective row list (indices of visible nodes). When the
    /// viewport cannot fit even one row by the `ceil(H/h)` rule, every row is
    /// rendered; a scroll offset pointing past the end of a shrunken list
    /// falls back to the top instead of erroring.
    pub fn update_vertical(&mut self, rows: &[usize], viewport: Viewport, row_height: f32) {
        let total_rows = rows.len();
        let row_count = if viewport.height > row_height && row_height > 0.0 {
            (viewport.height / row_height).ceil() as usize
        } else {
            total_rows
        };
        let total_height = total_rows as f32 * row_height;

        let mut first = if row_height > 0.0 {
            (viewport.scroll_top / row_height).floor() as usize
        } else {
            0
        };
        if first > total_rows.saturating_sub(1) {
            first = 0;
        }
        let last = (first + row_count).min(total_rows);

        self.view_rows = rows[first..last].to_vec();
        self.has_vertical_scroll_bar = row_count < total_rows;
        self.top_spacer = first as f32 * row_height;
        self.bottom_spacer =
            total_height - self.view_rows.len() as f32 * row_height - self.top_spacer;
    }

    /// Handles a scroll event, recomputing only the axes that moved.
    pub fn on_scroll(&mut self, rows: &[usize], viewport: Viewport, row_height: f32) -> ScrollDelta {
        let delta = ScrollDelta {
            vertical: viewport.scroll_top != self.last_top,
            horizontal: viewport.scroll_left != self.last_left,
        };

        if delta.vertical {
            self.update_vertical(rows, viewport, row_height);
        }
        if delta.horizontal {
            self.header_left = viewport.scroll_left;
        }

        self.last_top = viewport.scroll_top;
        self.last_left = viewport.scroll_left;
        delta
    }
}
