//! The grid engine's single owner type.
//!
//! [`TreeGrid`] owns every piece of grid state (the flattened tree store,
//! column set, width layout, scroll window, checkbox model, search filter,
//! and selection) and exposes controlled mutation operations plus read-only
//! views for the render host. State changes are announced through public
//! [`Signal`] fields.
//!
//! Recompute ordering follows the engine contract: operations that change
//! the effective row set (filtering, expand/collapse, dataset swaps) first
//! re-allocate column widths, then recompute the scroll window.
//!
//! # Signals
//!
//! - `row_checked((usize, bool))`: a row's checkbox changed
//! - `all_checked(Vec<usize>)`: the header checkbox toggled everything
//! - `checked_changed(Vec<usize>)`: the checked set after any check operation
//! - `selected_changed(Option<usize>)`: the selected row changed
//! - `row_clicked(ClickedRow)` / `row_double_clicked(ClickedRow)`
//! - `column_resized((usize, f32, f32))`: a drag-resize committed (column, old, new)
//! - `filter_applied(String)`: a debounced filter pass executed
//! - `view_changed(())`: the rendered slice or column widths changed

use std::time::Duration;

use arbor_grid_core::Signal;

use crate::error::{GridError, GridResult};
use crate::model::{
    CheckModel, CheckboxConfig, Column, Node, RowData, SearchFilter, TreeStore,
};

use super::layout::{ColumnLayout, ResizeDrag};
use super::scroll::{ScrollDelta, ScrollWindow};
use super::selection::{ClickedRow, ContextMenu, ContextMenuItem, RowSelection};
use super::viewport::Viewport;

const DEFAULT_ROW_HEIGHT: f32 = 24.0;

/// Stateful engine behind a virtualized, checkbox-enabled, filterable tree
/// data-grid.
pub struct TreeGrid {
    store: TreeStore,
    columns: Vec<Column>,
    layout: ColumnLayout,
    window: ScrollWindow,
    checks: CheckModel,
    filter: SearchFilter,
    selection: RowSelection,
    context_menu: ContextMenu,
    viewport: Viewport,
    row_height: f32,
    checkbox: CheckboxConfig,

    /// Emitted when a row's checkbox changes: (row index, new value).
    pub row_checked: Signal<(usize, bool)>,
    /// Emitted when the header checkbox toggles every row.
    pub all_checked: Signal<Vec<usize>>,
    /// Emitted with the checked set after any check operation.
    pub checked_changed: Signal<Vec<usize>>,
    /// Emitted when the selected row changes.
    pub selected_changed: Signal<Option<usize>>,
    /// Emitted when a row is clicked (and row selection is enabled).
    pub row_clicked: Signal<ClickedRow>,
    /// Emitted when a row is double-clicked.
    pub row_double_clicked: Signal<ClickedRow>,
    /// Emitted when a drag-resize commits: (column index, old width, new width).
    pub column_resized: Signal<(usize, f32, f32)>,
    /// Emitted when a debounced filter pass executes, with the applied term.
    pub filter_applied: Signal<String>,
    /// Emitted whenever the rendered slice or column widths change.
    pub view_changed: Signal<()>,
}

impl TreeGrid {
    /// Creates a grid over the given column configuration.
    pub fn new(mut columns: Vec<Column>) -> Self {
        for (index, column) in columns.iter_mut().enumerate() {
            column.index = index;
        }
        Self {
            store: TreeStore::new(),
            columns,
            layout: ColumnLayout::new(),
            window: ScrollWindow::new(),
            checks: CheckModel::default(),
            filter: SearchFilter::new(),
            selection: RowSelection::default(),
            context_menu: ContextMenu::default(),
            viewport: Viewport::default(),
            row_height: DEFAULT_ROW_HEIGHT,
            checkbox: CheckboxConfig::disabled(),
            row_checked: Signal::new(),
            all_checked: Signal::new(),
            checked_changed: Signal::new(),
            selected_changed: Signal::new(),
            row_clicked: Signal::new(),
            row_double_clicked: Signal::new(),
            column_resized: Signal::new(),
            filter_applied: Signal::new(),
            view_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Sets the source dataset.
    pub fn with_rows(mut self, rows: &[RowData]) -> Self {
        self.set_rows(rows);
        self
    }

    /// Configures the checkbox column.
    pub fn with_checkbox(mut self, checkbox: CheckboxConfig) -> Self {
        self.checkbox = checkbox;
        self.checks = CheckModel::new(checkbox.mode);
        self.checks.rebuild_from(&self.store);
        self
    }

    /// Enables or disables click row selection.
    pub fn with_row_select(mut self, enabled: bool) -> Self {
        self.selection = RowSelection::new(enabled);
        self
    }

    /// Sets the fixed row height in pixels.
    pub fn with_row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    /// Replaces the column layout configuration.
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the search debounce delay.
    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.filter.set_delay(delay);
        self
    }

    /// Sets the custom context-menu items.
    pub fn with_context_menu(mut self, items: Vec<ContextMenuItem>) -> Self {
        self.context_menu = ContextMenu::new(items);
        self
    }

    // =========================================================================
    // Dataset & Viewport
    // =========================================================================

    /// Replaces the source dataset, rebuilding the flattened store.
    ///
    /// Checkbox state is re-derived from the new rows' presets and the
    /// selection is cleared.
    pub fn set_rows(&mut self, rows: &[RowData]) {
        self.store.rebuild(rows);
        self.checks.rebuild_from(&self.store);
        self.selection.clear();
        self.relayout();
    }

    /// Updates the viewport geometry, re-allocating column widths.
    ///
    /// Auto columns the user never touched are redistributed for the new
    /// size; configured and drag-resized columns keep their widths.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.layout.reset_auto_widths(&mut self.columns);
        self.relayout();
    }

    /// Visibility hook: a grid becoming visible relayouts once.
    pub fn on_show(&mut self, visible: bool) {
        if visible {
            self.layout.reset_auto_widths(&mut self.columns);
            self.relayout();
        }
    }

    /// Handles a body scroll event, recomputing only the axes that moved.
    pub fn on_scroll(&mut self, scroll_top: f32, scroll_left: f32) -> ScrollDelta {
        self.viewport.scroll_top = scroll_top;
        self.viewport.scroll_left = scroll_left;
        let rows = self.store.visible_rows();
        let delta = self.window.on_scroll(&rows, self.viewport, self.row_height);
        if delta.vertical {
            self.view_changed.emit(());
        }
        delta
    }

    // =========================================================================
    // Tree Operations
    // =========================================================================

    /// Toggles a node's expansion and refreshes the layout and window.
    pub fn toggle_expand(&mut self, index: usize) -> GridResult<()> {
        self.store.toggle_expand(index)?;
        self.layout.reset_auto_widths(&mut self.columns);
        self.relayout();
        Ok(())
    }

    // =========================================================================
    // Checkbox Operations
    // =========================================================================

    /// Sets a row's checked state, cascading per the checkbox mode.
    pub fn check_row(&mut self, index: usize, value: bool) -> GridResult<()> {
        self.checks.check(&mut self.store, index, value)?;
        self.row_checked.emit((index, value));
        self.checked_changed.emit(self.checks.checked_rows().to_vec());
        Ok(())
    }

    /// Toggles every row via the header checkbox.
    pub fn check_all(&mut self) {
        self.checks.check_all(&mut self.store);
        let checked = self.checks.checked_rows().to_vec();
        self.all_checked.emit(checked.clone());
        self.checked_changed.emit(checked);
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Schedules a debounced filter pass for `term` (last write wins).
    pub fn search(&mut self, term: impl Into<String>) {
        self.filter.search(term);
    }

    /// Runs the scheduled filter pass if its debounce delay has elapsed.
    ///
    /// Returns `true` when a pass executed; column widths and the scroll
    /// window are recomputed in that case.
    pub fn poll_search(&mut self) -> bool {
        if self.filter.poll(&mut self.store, &self.columns) {
            self.filter_applied.emit(self.filter.term().to_string());
            self.relayout();
            true
        } else {
            false
        }
    }

    /// Cancels the debounce and runs any scheduled filter pass immediately.
    pub fn flush_search(&mut self) -> bool {
        if self.filter.flush(&mut self.store, &self.columns) {
            self.filter_applied.emit(self.filter.term().to_string());
            self.relayout();
            true
        } else {
            false
        }
    }

    /// The most recently applied search term.
    pub fn search_term(&self) -> &str {
        self.filter.term()
    }

    /// How long until a scheduled search is due, if one is pending.
    pub fn time_until_search(&mut self) -> Option<Duration> {
        self.filter.time_until_ready()
    }

    // =========================================================================
    // Column Resize
    // =========================================================================

    /// Starts an interactive column resize at the given pointer position.
    ///
    /// Returns `None` for the last visible column (not resizable by design)
    /// and for hidden columns.
    pub fn begin_column_resize(&self, index: usize, client_x: f32) -> Option<ResizeDrag> {
        self.layout.begin_resize(&self.columns, index, client_x)
    }

    /// Hides or shows a column, re-allocating widths.
    ///
    /// Hidden columns are excluded from width math, search matching, and
    /// resize sessions.
    pub fn set_column_hidden(&mut self, index: usize, hidden: bool) -> GridResult<()> {
        let len = self.columns.len();
        let column = self
            .columns
            .get_mut(index)
            .ok_or(GridError::ColumnIndex { index, len })?;
        if column.hidden != hidden {
            column.hidden = hidden;
            self.layout.reset_auto_widths(&mut self.columns);
            self.relayout();
        }
        Ok(())
    }

    /// Commits a resize session, transferring width to the next column.
    pub fn finish_column_resize(&mut self, drag: ResizeDrag) {
        let column = drag.column();
        let old_width = self.columns[column].width().unwrap_or(0.0);
        drag.finish(&mut self.columns);
        let new_width = self.columns[column].width().unwrap_or(0.0);

        self.column_resized.emit((column, old_width, new_width));
        self.layout.reset_auto_widths(&mut self.columns);
        self.relayout();
    }

    // =========================================================================
    // Selection & Context Menu
    // =========================================================================

    /// Handles a row click; selects the row when row selection is enabled.
    ///
    /// Returns `true` when the selection changed.
    pub fn click_row(&mut self, index: usize, field: Option<&str>) -> GridResult<bool> {
        let selected = self.selection.click(&self.store, index)?;
        if selected {
            self.selected_changed.emit(Some(index));
            self.row_clicked.emit(self.clicked_row(index, field));
        }
        Ok(selected)
    }

    /// Handles a row double-click; always selects.
    pub fn double_click_row(&mut self, index: usize, field: Option<&str>) -> GridResult<()> {
        self.selection.double_click(&self.store, index)?;
        self.selected_changed.emit(Some(index));
        self.row_double_clicked.emit(self.clicked_row(index, field));
        Ok(())
    }

    fn clicked_row(&self, index: usize, field: Option<&str>) -> ClickedRow {
        ClickedRow {
            row: index,
            field: field.map(str::to_string),
            column: field.and_then(|f| self.column_index(f)),
        }
    }

    /// Handles a context-menu request over a row (or over empty space).
    ///
    /// The selection follows the request and the menu items are rebuilt,
    /// deriving each item's `disabled` flag from its validator.
    pub fn context_menu(&mut self, row: Option<usize>) -> GridResult<&[ContextMenuItem]> {
        match row {
            Some(index) => {
                self.store.get(index)?;
                self.selection.select(Some(index));
                self.context_menu.build(self.store.node(index));
                self.selected_changed.emit(Some(index));
            }
            None => {
                self.selection.clear();
                self.context_menu.build(None);
                self.selected_changed.emit(None);
            }
        }
        Ok(self.context_menu.items())
    }

    // =========================================================================
    // Read-only Views
    // =========================================================================

    /// The flattened tree store.
    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// The configured columns with their current widths.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Finds a column's position by field name.
    pub fn column_index(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.field() == field)
    }

    /// The scroll window (rendered slice, spacer heights, scrollbar flag).
    pub fn scroll(&self) -> &ScrollWindow {
        &self.window
    }

    /// The nodes of the currently rendered slice, in order.
    pub fn view(&self) -> impl Iterator<Item = &Node> {
        self.window
            .view_rows()
            .iter()
            .filter_map(|&index| self.store.node(index))
    }

    /// The checked node indices, in check order.
    pub fn checked_rows(&self) -> &[usize] {
        self.checks.checked_rows()
    }

    /// Whether every row is checked.
    pub fn is_header_checked(&self) -> bool {
        self.checks.is_header_checked()
    }

    /// The selected node index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    /// The current viewport geometry.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The fixed row height in pixels.
    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// The column layout configuration.
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    // =========================================================================
    // Internal Recompute
    // =========================================================================

    /// Re-allocates column widths, then recomputes the scroll window.
    fn relayout(&mut self) {
        let effective = self.store.visible_rows();
        self.layout.allocate(
            &mut self.columns,
            self.viewport,
            self.row_height,
            effective.len(),
            self.checkbox.enabled,
        );
        self.window
            .update_vertical(&effective, self.viewport, self.row_height);
        self.view_changed.emit(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, ColumnKind};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::thread::sleep;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", ColumnKind::Text).with_width(50.0),
            Column::new("name", ColumnKind::Text),
            Column::new("qty", ColumnKind::Number),
            Column::new("price", ColumnKind::Float),
        ]
    }

    /// A root with `children` leaf rows.
    fn dataset(children: usize) -> Vec<RowData> {
        let mut root = RowData::new()
            .with_cell("id", "n0")
            .with_cell("name", "root")
            .with_cell("qty", 12345)
            .with_cell("price", 1234.5);
        for i in 0..children {
            root = root.with_child(
                RowData::new()
                    .with_cell("id", format!("n{}", i + 1))
                    .with_cell("name", format!("item-{i}"))
                    .with_cell("qty", i as i64)
                    .with_cell("price", i as f64 + 0.5),
            );
        }
        vec![root]
    }

    #[test]
    fn test_initial_layout_and_window() {
        let mut grid = TreeGrid::new(columns()).with_rows(&dataset(3));
        grid.set_viewport(Viewport::new(500.0, 500.0));

        // 450 across 3 auto columns, all 4 rows rendered, no spacers.
        let widths: Vec<f32> = grid.columns().iter().map(|c| c.width().unwrap()).collect();
        assert_eq!(widths, vec![50.0, 150.0, 150.0, 150.0]);
        assert_eq!(grid.view().count(), 4);
        assert_eq!(grid.scroll().top_spacer_height(), 0.0);
        assert_eq!(grid.scroll().bottom_spacer_height(), 0.0);
        assert!(!grid.scroll().has_vertical_scroll_bar());
    }

    #[test]
    fn test_scrolling_moves_the_window() {
        let mut grid = TreeGrid::new(columns())
            .with_rows(&dataset(100))
            .with_row_height(10.0);
        grid.set_viewport(Viewport::new(500.0, 100.0));

        assert!(grid.scroll().has_vertical_scroll_bar());
        assert_eq!(grid.view().count(), 10);

        let delta = grid.on_scroll(250.0, 0.0);
        assert!(delta.vertical);
        let first = grid.view().next().unwrap();
        assert_eq!(first.index(), 25);
        assert_eq!(grid.scroll().top_spacer_height(), 250.0);

        let delta = grid.on_scroll(250.0, 40.0);
        assert!(!delta.vertical);
        assert!(delta.horizontal);
        assert_eq!(grid.scroll().header_scroll_left(), 40.0);
    }

    #[test]
    fn test_expand_collapse_through_grid() {
        let mut grid = TreeGrid::new(columns()).with_rows(&dataset(5));
        grid.set_viewport(Viewport::new(500.0, 500.0));

        grid.toggle_expand(0).unwrap();
        assert_eq!(grid.view().count(), 1);

        grid.toggle_expand(0).unwrap();
        assert_eq!(grid.view().count(), 6);
    }

    #[test]
    fn test_search_end_to_end() {
        let mut grid = TreeGrid::new(columns())
            .with_rows(&dataset(5))
            .with_search_delay(Duration::from_millis(5));
        grid.set_viewport(Viewport::new(500.0, 500.0));

        let applied = Arc::new(Mutex::new(Vec::new()));
        let sink = applied.clone();
        grid.filter_applied.connect(move |term| {
            sink.lock().push(term.clone());
        });

        grid.search("item-3");
        assert!(!grid.poll_search());

        sleep(Duration::from_millis(15));
        assert!(grid.poll_search());
        assert_eq!(grid.search_term(), "item-3");
        assert_eq!(*applied.lock(), vec!["item-3".to_string()]);

        // The match and its ancestor chain remain; siblings are gone.
        let visible: Vec<usize> = grid.view().map(Node::index).collect();
        assert_eq!(visible, vec![0, 4]);
    }

    #[test]
    fn test_check_signals() {
        let mut grid = TreeGrid::new(columns())
            .with_rows(&dataset(2))
            .with_checkbox(CheckboxConfig::multi());

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        grid.row_checked.connect(move |&(row, value)| {
            sink.lock().push((row, value));
        });
        let counts = Arc::new(Mutex::new(Vec::new()));
        let sink = counts.clone();
        grid.checked_changed.connect(move |rows| {
            sink.lock().push(rows.len());
        });

        grid.check_row(0, true).unwrap();
        assert_eq!(*events.lock(), vec![(0, true)]);
        assert_eq!(*counts.lock(), vec![3]);
        assert!(grid.is_header_checked());

        grid.check_row(1, false).unwrap();
        assert!(!grid.is_header_checked());
        assert_eq!(grid.checked_rows(), &[2]);
    }

    #[test]
    fn test_check_all_alternates() {
        let mut grid = TreeGrid::new(columns())
            .with_rows(&dataset(4))
            .with_checkbox(CheckboxConfig::multi());

        grid.check_all();
        assert_eq!(grid.checked_rows().len(), 5);
        grid.check_all();
        assert!(grid.checked_rows().is_empty());
        grid.check_all();
        assert_eq!(grid.checked_rows().len(), 5);
    }

    #[test]
    fn test_column_resize_through_grid() {
        let mut grid = TreeGrid::new(columns()).with_rows(&dataset(3));
        grid.set_viewport(Viewport::new(500.0, 500.0));

        let resized = Arc::new(Mutex::new(Vec::new()));
        let sink = resized.clone();
        grid.column_resized.connect(move |&(column, old, new)| {
            sink.lock().push((column, old, new));
        });

        let mut drag = grid.begin_column_resize(1, 200.0).unwrap();
        drag.drag(220.0);
        grid.finish_column_resize(drag);

        assert_eq!(*resized.lock(), vec![(1, 150.0, 170.0)]);
        // Pair total conserved through the relayout that follows.
        let widths: Vec<f32> = grid.columns().iter().map(|c| c.width().unwrap()).collect();
        assert_eq!(widths[1] + widths[2], 300.0);
        assert!(grid.columns()[1].is_resized());

        // The last visible column refuses a resize session.
        assert!(grid.begin_column_resize(3, 0.0).is_none());
    }

    #[test]
    fn test_selection_and_context_menu() {
        let mut grid = TreeGrid::new(columns())
            .with_rows(&dataset(2))
            .with_row_select(true)
            .with_context_menu(vec![
                ContextMenuItem::new("open", "Open"),
                ContextMenuItem::new("bulk", "Bulk update").with_validate(|_, row| {
                    row.cell("qty").and_then(CellValue::as_int).unwrap_or(0) > 0
                }),
            ]);

        let selections = Arc::new(Mutex::new(Vec::new()));
        let sink = selections.clone();
        grid.selected_changed.connect(move |selected| {
            sink.lock().push(*selected);
        });

        assert!(grid.click_row(1, Some("name")).unwrap());
        assert_eq!(grid.selected(), Some(1));

        // Node 1 is item-0 with qty 0: the validated item is disabled.
        let items = grid.context_menu(Some(1)).unwrap();
        assert!(!items[0].is_disabled());
        assert!(items[1].is_disabled());

        // Node 2 is item-1 with qty 1: enabled.
        let items = grid.context_menu(Some(2)).unwrap();
        assert!(!items[1].is_disabled());

        // Empty space clears selection and the custom items.
        assert!(grid.context_menu(None).unwrap().is_empty());
        assert_eq!(grid.selected(), None);
        assert_eq!(*selections.lock(), vec![Some(1), Some(1), Some(2), None]);
    }

    #[test]
    fn test_click_without_row_select() {
        let mut grid = TreeGrid::new(columns()).with_rows(&dataset(1));
        assert!(!grid.click_row(0, None).unwrap());
        assert_eq!(grid.selected(), None);

        // Double-click selects regardless.
        grid.double_click_row(0, Some("id")).unwrap();
        assert_eq!(grid.selected(), Some(0));
    }

    #[test]
    fn test_single_mode_through_grid() {
        let mut grid = TreeGrid::new(columns())
            .with_rows(&dataset(2))
            .with_checkbox(CheckboxConfig::single());

        grid.check_row(1, true).unwrap();
        grid.check_row(2, true).unwrap();
        // The previous row was unchecked and nothing cascaded.
        assert_eq!(grid.checked_rows(), &[2]);
        assert!(!grid.store().node(1).unwrap().is_checked());
        assert!(!grid.store().node(0).unwrap().is_checked());
    }

    #[test]
    fn test_hide_column_reallocates() {
        let mut grid = TreeGrid::new(columns()).with_rows(&dataset(3));
        grid.set_viewport(Viewport::new(500.0, 500.0));

        grid.set_column_hidden(3, true).unwrap();
        // 450 now splits across two auto columns.
        assert_eq!(grid.columns()[1].width(), Some(225.0));
        assert_eq!(grid.columns()[2].width(), Some(225.0));

        assert_eq!(
            grid.set_column_hidden(9, true),
            Err(GridError::ColumnIndex { index: 9, len: 4 })
        );
    }

    #[test]
    fn test_on_show_relayouts() {
        let mut grid = TreeGrid::new(columns()).with_rows(&dataset(1));

        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        grid.view_changed.connect(move |_| *sink.lock() += 1);

        grid.on_show(false);
        assert_eq!(*count.lock(), 0);
        grid.on_show(true);
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_clicked_row_payload_resolves_column() {
        let mut grid = TreeGrid::new(columns())
            .with_rows(&dataset(1))
            .with_row_select(true);

        let clicks = Arc::new(Mutex::new(Vec::new()));
        let sink = clicks.clone();
        grid.row_clicked.connect(move |payload| {
            sink.lock().push(payload.clone());
        });

        grid.click_row(1, Some("qty")).unwrap();
        let payload = clicks.lock()[0].clone();
        assert_eq!(payload.row, 1);
        assert_eq!(payload.field.as_deref(), Some("qty"));
        assert_eq!(payload.column, Some(2));
    }
}
