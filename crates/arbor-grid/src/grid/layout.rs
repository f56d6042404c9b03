//! Column width allocation and interactive resize.
//!
//! [`ColumnLayout`] distributes the available container width across columns:
//! fixed-width columns keep their width, the remainder is split evenly across
//! auto columns with floor division, and the integer remainder lands on the
//! last visible column so the allocated total matches the available width
//! exactly. Every width is clamped to a per-column minimum (custom-renderer
//! columns use a larger one).
//!
//! Interactive resize is a scoped [`ResizeDrag`] session: created on pointer
//! down, fed pointer positions while dragging (moving only the indicator
//! line), and committed exactly once by [`ResizeDrag::finish`], which
//! consumes the session and transfers width between the dragged column and
//! its next visible neighbor.

use crate::model::Column;

use super::viewport::Viewport;

const DEFAULT_COLUMN_WIDTH: f32 = 80.0;
const MINIMUM_COLUMN_WIDTH: f32 = 40.0;
const RENDERER_MINIMUM_WIDTH: f32 = 80.0;
const SCROLL_BAR_WIDTH: f32 = 17.0;

/// Column width allocator.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    /// Whether auto columns stretch to fill the container.
    fit: bool,
    /// Most recently computed auto-column width; also the fallback when the
    /// container has no room left.
    column_width: f32,
    /// Minimum width for plain columns.
    min_width: f32,
    /// Minimum width for custom-renderer columns.
    renderer_min_width: f32,
    /// Vertical scrollbar thickness, subtracted when the bar will appear.
    scroll_width: f32,
    /// Width reserved for the checkbox column when enabled.
    checkbox_width: f32,
    /// Flipped after each allocation pass; a change signal for dependents,
    /// not a semantic state.
    resize_toggle: bool,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnLayout {
    /// Creates a layout with default metrics.
    pub fn new() -> Self {
        Self {
            fit: true,
            column_width: DEFAULT_COLUMN_WIDTH,
            min_width: MINIMUM_COLUMN_WIDTH,
            renderer_min_width: RENDERER_MINIMUM_WIDTH,
            scroll_width: SCROLL_BAR_WIDTH,
            checkbox_width: MINIMUM_COLUMN_WIDTH,
            resize_toggle: false,
        }
    }

    /// Sets whether auto columns stretch to fill the container.
    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    /// Sets the fallback/default width for auto columns.
    pub fn with_default_column_width(mut self, width: f32) -> Self {
        self.column_width = width;
        self
    }

    /// Sets the minimum width for plain columns.
    pub fn with_minimum_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }

    /// Sets the minimum width for custom-renderer columns.
    pub fn with_renderer_minimum_width(mut self, width: f32) -> Self {
        self.renderer_min_width = width;
        self
    }

    /// Sets the vertical scrollbar thickness.
    pub fn with_scroll_bar_width(mut self, width: f32) -> Self {
        self.scroll_width = width;
        self
    }

    /// Sets the width reserved for the checkbox column.
    pub fn with_checkbox_width(mut self, width: f32) -> Self {
        self.checkbox_width = width;
        self
    }

    /// The minimum width that applies to a column.
    pub fn minimum_width_for(&self, column: &Column) -> f32 {
        if column.is_renderer() {
            self.renderer_min_width
        } else {
            self.min_width
        }
    }

    /// The allocation change-signal; flips after every pass.
    pub fn resize_toggle(&self) -> bool {
        self.resize_toggle
    }

    /// The most recently computed auto-column width.
    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    /// Clears the width of columns eligible for redistribution.
    ///
    /// Runs before an allocation pass when the viewport size changes: a
    /// column re-enters auto distribution only if the caller never gave it a
    /// width and the user never dragged it.
    pub fn reset_auto_widths(&self, columns: &mut [Column]) {
        if !self.fit {
            return;
        }
        for column in columns.iter_mut() {
            if column.configured_width().is_none() && !column.resized {
                column.width = None;
            }
        }
    }

    /// Distributes the container width across visible columns.
    ///
    /// `row_count` is the count of currently effective rows; together with
    /// `row_height` it decides whether a vertical scrollbar will appear and
    /// claim part of the width.
    pub fn allocate(
        &mut self,
        columns: &mut [Column],
        viewport: Viewport,
        row_height: f32,
        row_count: usize,
        checkbox: bool,
    ) {
        let mut column_width = self.column_width;
        let mut remain = 0.0;

        if self.fit {
            let mut el_width = viewport.width;

            let mut total_fixed = 0.0;
            let mut auto_count: usize = 0;
            for column in columns.iter().filter(|c| !c.is_hidden()) {
                match column.width() {
                    Some(width) => total_fixed += width,
                    None => auto_count += 1,
                }
            }

            if row_height * row_count as f32 > viewport.height - self.scroll_width {
                el_width -= self.scroll_width;
            }
            if checkbox {
                el_width -= self.checkbox_width;
            }

            let available = el_width - total_fixed;
            if available > 0.0 && auto_count > 0 {
                let per_column = (available / auto_count as f32).floor();
                remain = available - per_column * auto_count as f32;
                column_width = per_column;
            } else {
                // No room (or nothing to distribute): keep the prior width.
                column_width = self.column_width;
            }

            column_width = column_width.max(self.min_width);
            self.column_width = column_width;
        }

        for column in columns.iter_mut() {
            let minimum = if column.is_renderer() {
                self.renderer_min_width
            } else {
                self.min_width
            };
            if let Some(width) = column.width
                && width < minimum
            {
                column.width = Some(minimum);
            }
            if column.width.is_none() && !column.hidden {
                column.width = Some(column_width);
            }
        }

        if remain > 0.0
            && let Some(last) = columns.iter_mut().rev().find(|c| !c.hidden)
            && let Some(width) = last.width
        {
            last.width = Some(width + remain);
        }

        self.resize_toggle = !self.resize_toggle;
        tracing::trace!(
            target: "arbor_grid::layout",
            column_width,
            remain,
            "column widths allocated"
        );
    }

    /// Starts an interactive resize of the column at `index`.
    ///
    /// Returns `None` when the column is hidden or is the last visible
    /// column (resizing the last column is disallowed by design, so the
    /// request is a no-op rather than an error). `client_x` is the pointer
    /// position at press time; later positions are fed to
    /// [`ResizeDrag::drag`].
    pub fn begin_resize(
        &self,
        columns: &[Column],
        index: usize,
        client_x: f32,
    ) -> Option<ResizeDrag> {
        if index >= columns.len() || columns[index].is_hidden() {
            return None;
        }
        let last_visible = columns.iter().rposition(|c| !c.is_hidden())?;
        if index == last_visible {
            return None;
        }
        let next = (index + 1..columns.len()).find(|&i| !columns[i].is_hidden())?;

        let column_left: f32 = columns
            .iter()
            .take(index)
            .filter(|c| !c.is_hidden())
            .map(|c| c.width().unwrap_or(0.0))
            .sum();
        let start_left = column_left + columns[index].width().unwrap_or(0.0);
        let next_right = start_left + columns[next].width().unwrap_or(0.0);

        Some(ResizeDrag {
            column: index,
            next_column: next,
            column_left,
            min_left: column_left + self.minimum_width_for(&columns[index]),
            max_right: next_right - self.minimum_width_for(&columns[next]),
            start_mouse_x: client_x,
            start_left,
            line: start_left,
        })
    }
}

/// A transient column-resize session.
///
/// Width is transferred between the dragged column and its next visible
/// neighbor on [`finish`](Self::finish); the pair's total width is conserved.
#[derive(Debug)]
pub struct ResizeDrag {
    column: usize,
    next_column: usize,
    /// Left edge of the dragged column.
    column_left: f32,
    /// Leftmost allowed indicator position.
    min_left: f32,
    /// Rightmost allowed indicator position.
    max_right: f32,
    /// Pointer position at press time.
    start_mouse_x: f32,
    /// Indicator start position (the dragged column's right edge).
    start_left: f32,
    /// Current indicator position.
    line: f32,
}

impl ResizeDrag {
    /// The dragged column's index.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The neighbor that absorbs the width delta.
    pub fn next_column(&self) -> usize {
        self.next_column
    }

    /// Feeds a pointer position, returning the clamped indicator position.
    ///
    /// Only the visual indicator moves during the drag; column widths are
    /// untouched until [`finish`](Self::finish).
    pub fn drag(&mut self, client_x: f32) -> f32 {
        let delta = client_x - self.start_mouse_x;
        let proxy = self.start_left + delta;
        self.line = proxy.clamp(self.min_left, self.max_right);
        self.line
    }

    /// The current indicator position.
    pub fn line(&self) -> f32 {
        self.line
    }

    /// Commits the resize, consuming the session.
    ///
    /// The dragged column's new width runs from its left edge to the
    /// indicator; the neighbor absorbs the difference. Both columns are
    /// marked resized and leave auto distribution for good.
    pub fn finish(self, columns: &mut [Column]) {
        let changed_width = self.line - self.column_left;

        let Some(target) = columns.get(self.column) else {
            return;
        };
        let old_width = target.width().unwrap_or(0.0);

        columns[self.column].width = Some(changed_width);
        columns[self.column].resized = true;
        if let Some(next) = columns.get_mut(self.next_column) {
            let next_width = next.width().unwrap_or(0.0);
            next.width = Some(next_width + (old_width - changed_width));
            next.resized = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnKind, Renderer};

    fn visible_widths(columns: &[Column]) -> Vec<f32> {
        columns
            .iter()
            .filter(|c| !c.is_hidden())
            .map(|c| c.width().unwrap_or(0.0))
            .collect()
    }

    fn four_columns() -> Vec<Column> {
        vec![
            Column::new("id", ColumnKind::Text).with_width(50.0),
            Column::new("name", ColumnKind::Text),
            Column::new("qty", ColumnKind::Number),
            Column::new("price", ColumnKind::Float),
        ]
    }

    #[test]
    fn test_even_distribution() {
        let mut layout = ColumnLayout::new();
        let mut columns = four_columns();

        // Container 500, fixed 50, no scrollbar, no checkbox:
        // 450 across 3 auto columns = 150 each.
        layout.allocate(&mut columns, Viewport::new(500.0, 500.0), 24.0, 3, false);
        assert_eq!(visible_widths(&columns), vec![50.0, 150.0, 150.0, 150.0]);
    }

    #[test]
    fn test_remainder_goes_to_last_column() {
        let mut layout = ColumnLayout::new();
        let mut columns = four_columns();

        // Available 452 → floor(452/3) = 150, remainder 2 lands on `price`.
        layout.allocate(&mut columns, Viewport::new(502.0, 500.0), 24.0, 3, false);
        assert_eq!(visible_widths(&columns), vec![50.0, 150.0, 150.0, 152.0]);
        // No pixel drift: total equals the container width.
        let total: f32 = visible_widths(&columns).iter().sum();
        assert_eq!(total, 502.0);
    }

    #[test]
    fn test_scrollbar_reserves_width() {
        let mut layout = ColumnLayout::new();
        let mut columns = four_columns();

        // 10 rows * 24 = 240 exceeds 100 - 17, so the bar claims 17.
        layout.allocate(&mut columns, Viewport::new(517.0, 100.0), 24.0, 10, false);
        assert_eq!(visible_widths(&columns), vec![50.0, 150.0, 150.0, 150.0]);
    }

    #[test]
    fn test_checkbox_column_reserves_width() {
        let mut layout = ColumnLayout::new();
        let mut columns = four_columns();

        layout.allocate(&mut columns, Viewport::new(540.0, 500.0), 24.0, 3, true);
        assert_eq!(visible_widths(&columns), vec![50.0, 150.0, 150.0, 150.0]);
    }

    #[test]
    fn test_no_room_falls_back_to_prior_width() {
        let mut layout = ColumnLayout::new();
        let mut columns = four_columns();

        // Fixed width alone exceeds the container; autos keep the default.
        layout.allocate(&mut columns, Viewport::new(40.0, 500.0), 24.0, 3, false);
        assert_eq!(visible_widths(&columns), vec![50.0, 80.0, 80.0, 80.0]);
    }

    #[test]
    fn test_minimum_clamps() {
        let mut layout = ColumnLayout::new();
        let mut columns = vec![
            Column::new("tiny", ColumnKind::Text).with_width(10.0),
            Column::new("painted", ColumnKind::Text)
                .with_width(50.0)
                .with_renderer(Renderer::new("gauge")),
            Column::new("rest", ColumnKind::Text),
        ];

        layout.allocate(&mut columns, Viewport::new(600.0, 500.0), 24.0, 1, false);
        // 10 is raised to the plain minimum, 50 to the renderer minimum.
        assert_eq!(columns[0].width(), Some(40.0));
        assert_eq!(columns[1].width(), Some(80.0));
    }

    #[test]
    fn test_hidden_columns_excluded() {
        let mut layout = ColumnLayout::new();
        let mut columns = vec![
            Column::new("a", ColumnKind::Text),
            Column::new("ghost", ColumnKind::Text).with_hidden(true),
            Column::new("b", ColumnKind::Text),
        ];

        layout.allocate(&mut columns, Viewport::new(200.0, 500.0), 24.0, 1, false);
        assert_eq!(visible_widths(&columns), vec![100.0, 100.0]);
        assert_eq!(columns[1].width(), None);
    }

    #[test]
    fn test_resize_toggle_flips_each_pass() {
        let mut layout = ColumnLayout::new();
        let mut columns = four_columns();
        let viewport = Viewport::new(500.0, 500.0);

        assert!(!layout.resize_toggle());
        layout.allocate(&mut columns, viewport, 24.0, 3, false);
        assert!(layout.resize_toggle());
        layout.allocate(&mut columns, viewport, 24.0, 3, false);
        assert!(!layout.resize_toggle());
    }

    #[test]
    fn test_reset_auto_widths_spares_resized_and_configured() {
        let mut layout = ColumnLayout::new();
        let mut columns = four_columns();
        layout.allocate(&mut columns, Viewport::new(500.0, 500.0), 24.0, 3, false);

        // Drag `name` wider at the expense of `qty`.
        let mut drag = layout.begin_resize(&columns, 1, 200.0).unwrap();
        drag.drag(230.0);
        drag.finish(&mut columns);

        layout.reset_auto_widths(&mut columns);
        // Configured column keeps its width, dragged columns keep theirs,
        // the untouched auto column redistributes.
        assert_eq!(columns[0].width(), Some(50.0));
        assert_eq!(columns[1].width(), Some(180.0));
        assert_eq!(columns[2].width(), Some(120.0));
        assert_eq!(columns[3].width(), None);
    }

    #[test]
    fn test_drag_resize_conserves_pair_total() {
        let mut layout = ColumnLayout::new();
        let mut columns = four_columns();
        layout.allocate(&mut columns, Viewport::new(500.0, 500.0), 24.0, 3, false);

        // `name` spans [50, 200); its drag handle starts at x = 200.
        let mut drag = layout.begin_resize(&columns, 1, 200.0).unwrap();
        assert_eq!(drag.line(), 200.0);

        drag.drag(235.0);
        drag.finish(&mut columns);

        assert_eq!(columns[1].width(), Some(185.0));
        assert_eq!(columns[2].width(), Some(115.0));
        assert!(columns[1].is_resized());
        assert!(columns[2].is_resized());
    }

    #[test]
    fn test_drag_clamps_to_minimums() {
        let mut layout = ColumnLayout::new();
        let mut columns = four_columns();
        layout.allocate(&mut columns, Viewport::new(500.0, 500.0), 24.0, 3, false);

        let mut drag = layout.begin_resize(&columns, 1, 200.0).unwrap();
        // Far left: clamped to the dragged column's minimum width.
        assert_eq!(drag.drag(-1000.0), 50.0 + 40.0);
        // Far right: clamped to preserve the neighbor's minimum.
        assert_eq!(drag.drag(1000.0), 350.0 - 40.0);

        drag.finish(&mut columns);
        assert_eq!(columns[1].width(), Some(260.0));
        assert_eq!(columns[2].width(), Some(40.0));
    }

    #[test]
    fn test_last_visible_column_not_resizable() {
        let layout = ColumnLayout::new();
        let mut columns = four_columns();
        columns[3].hidden = true;

        assert!(layout.begin_resize(&columns, 3, 0.0).is_none());
        // `qty` is now the last visible column.
        assert!(layout.begin_resize(&columns, 2, 0.0).is_none());
        assert!(layout.begin_resize(&columns, 1, 0.0).is_some());
    }

    #[test]
    fn test_resize_skips_hidden_neighbor() {
        let mut layout = ColumnLayout::new();
        let mut columns = four_columns();
        columns[2].hidden = true;
        layout.allocate(&mut columns, Viewport::new(350.0, 500.0), 24.0, 1, false);
        // Widths: id 50, name 150, price 150.

        let drag = layout.begin_resize(&columns, 1, 200.0).unwrap();
        assert_eq!(drag.next_column(), 3);
    }
}
