//! Data model for the tree grid.
//!
//! This module owns everything below the interaction layer:
//!
//! - `CellValue` / `ColumnKind`: typed cell data and display conversion
//! - `RowData`: nested source records handed in by the host
//! - `TreeStore` / `Node`: the flattened, indexed arena with visibility and
//!   expansion state
//! - `Column` / `Renderer`: column configuration
//! - `CheckModel`: checkbox state with parent/child cascade
//! - `SearchFilter`: debounced text filtering with ancestor restoration
//!
//! The arena is rebuilt wholesale when the source dataset changes; all other
//! state mutates in place through the owning [`TreeGrid`](crate::TreeGrid).

mod check;
mod column;
mod filter;
mod node;
mod row;
mod value;

pub use check::{CheckModel, CheckboxConfig, CheckboxMode};
pub use column::{Column, Renderer};
pub use filter::{DEFAULT_SEARCH_DELAY, SearchFilter};
pub use node::{Node, TreeStore};
pub use row::RowData;
pub use value::{CellValue, ColumnKind, converted_text, number_with_comma};
