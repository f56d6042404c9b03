//! A virtualized, checkbox-enabled, filterable tree data-grid state engine.
//!
//! Arbor Grid is the stateful core behind a tree data-grid widget. It owns no
//! rendering, measures nothing, and schedules nothing; the host hands it a
//! nested dataset, column definitions, and plain geometry readings, and reads
//! back exactly what to paint:
//!
//! - **Flattening**: the nested dataset becomes an indexed arena of nodes in
//!   depth-first pre-order, carrying visibility, expansion, checkbox, and
//!   filter state.
//! - **Virtualization**: given the viewport and a fixed row height, the
//!   engine computes the rendered slice plus the spacer heights that simulate
//!   the full list's scroll geometry.
//! - **Column layout**: fixed widths are honored, auto columns share the
//!   remaining width evenly, minimum widths are enforced, and columns can be
//!   drag-resized against their neighbor.
//! - **Checkbox cascade**: checking a row flows down to descendants and up to
//!   ancestors (all-or-nothing), with a maintained checked set and select-all.
//! - **Search**: a debounced text filter matches converted cell text and
//!   forces ancestor chains visible so matches can be revealed.
//!
//! State changes are announced through [`Signal`](arbor_grid_core::Signal)
//! fields on [`TreeGrid`].
//!
//! # Example
//!
//! ```
//! use arbor_grid::{Column, ColumnKind, RowData, TreeGrid, Viewport};
//!
//! let columns = vec![
//!     Column::new("id", ColumnKind::Text).with_width(50.0),
//!     Column::new("name", ColumnKind::Text),
//!     Column::new("qty", ColumnKind::Number),
//! ];
//! let rows = vec![
//!     RowData::new()
//!         .with_cell("id", "n0")
//!         .with_cell("name", "inventory")
//!         .with_child(
//!             RowData::new()
//!                 .with_cell("id", "n1")
//!                 .with_cell("name", "widgets")
//!                 .with_cell("qty", 12345),
//!         ),
//! ];
//!
//! let mut grid = TreeGrid::new(columns).with_rows(&rows);
//! grid.set_viewport(Viewport::new(500.0, 300.0));
//!
//! // Both rows fit, so both are rendered with no spacers.
//! assert_eq!(grid.view().count(), 2);
//! assert_eq!(grid.scroll().top_spacer_height(), 0.0);
//! ```

mod error;
pub mod grid;
pub mod model;

pub use error::{GridError, GridResult};
pub use grid::{
    ClickedRow, ColumnLayout, ContextMenu, ContextMenuItem, MenuValidator, ResizeDrag,
    RowSelection, ScrollDelta, ScrollWindow, TreeGrid, Viewport,
};
pub use model::{
    CellValue, CheckModel, CheckboxConfig, CheckboxMode, Column, ColumnKind, Node, Renderer,
    RowData, SearchFilter, TreeStore,
};
