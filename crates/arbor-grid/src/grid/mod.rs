//! The interaction layer of the grid engine.
//!
//! This module owns everything the host drives directly:
//!
//! - `Viewport`: geometry readings supplied by the host
//! - `ColumnLayout` / `ResizeDrag`: width allocation and interactive resize
//! - `ScrollWindow`: the virtualized rendered slice with spacer heights
//! - `RowSelection` / `ContextMenu`: click selection and menu building
//! - `TreeGrid`: the single owner tying the whole engine together
//!
//! Hosts construct a [`TreeGrid`], push abstracted input signals into it
//! (viewport metrics, scroll offsets, pointer positions, search terms), and
//! read back the rendered slice, column widths, and checked/selected rows.

mod layout;
mod scroll;
mod selection;
mod tree_grid;
mod viewport;

pub use layout::{ColumnLayout, ResizeDrag};
pub use scroll::{ScrollDelta, ScrollWindow};
pub use selection::{ClickedRow, ContextMenu, ContextMenuItem, MenuValidator, RowSelection};
pub use tree_grid::TreeGrid;
pub use viewport::Viewport;
