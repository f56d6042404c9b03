//! Core systems for Arbor Grid.
//!
//! This crate provides the foundational components of the Arbor Grid engine:
//!
//! - **Signal/Slot System**: Type-safe notification of state changes
//! - **Timers**: Poll-driven one-shot and repeating timers (the substrate
//!   for the grid's debounced search)
//! - **Logging**: `tracing` target constants for per-subsystem filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use arbor_grid_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use arbor_grid_core::TimerManager;
//! use std::time::Duration;
//!
//! let mut timers = TimerManager::new();
//! let id = timers.start_one_shot(Duration::from_millis(500));
//!
//! // Later, from the host's tick:
//! for fired in timers.process_expired() {
//!     assert_eq!(fired, id);
//! }
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{CoreError, Result, SignalError, TimerError};
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerKind, TimerManager};
