//! Error types for the grid engine.

use thiserror::Error;

/// Errors that can occur when driving the grid engine.
///
/// Runtime conditions the engine absorbs by design (stale scroll offsets,
/// resize on the last column, empty search input) never surface here; this
/// type covers structural misuse of the API only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A row operation referenced a node index outside the flattened store.
    #[error("node index {index} out of bounds (store holds {len} nodes)")]
    NodeIndex {
        /// The offending index.
        index: usize,
        /// The number of nodes in the store.
        len: usize,
    },

    /// A column operation referenced a column index outside the configured set.
    #[error("column index {index} out of bounds ({len} columns configured)")]
    ColumnIndex {
        /// The offending index.
        index: usize,
        /// The number of configured columns.
        len: usize,
    },
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
