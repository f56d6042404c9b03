//! Logging facilities for Arbor Grid.
//!
//! Arbor Grid uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! All engine call sites log under the targets listed in [`targets`], so a
//! directive such as `arbor_grid::filter=trace` narrows output to a single
//! subsystem.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "arbor_grid_core";
    /// Timer system target.
    pub const TIMER: &str = "arbor_grid_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "arbor_grid_core::signal";
    /// Grid engine target.
    pub const GRID: &str = "arbor_grid";
    /// Search filter target.
    pub const FILTER: &str = "arbor_grid::filter";
    /// Column layout target.
    pub const LAYOUT: &str = "arbor_grid::layout";
    /// Tree store target.
    pub const TREE: &str = "arbor_grid::tree";
}
