//! Debounced text filtering with ancestor restoration.
//!
//! [`SearchFilter`] collapses rapid `search` calls into a single pass: each
//! call cancels the previously scheduled pass and schedules a fresh one, so
//! the last term always wins and at most one pass runs per quiescent period.
//! The host drives execution by calling [`SearchFilter::poll`] from its tick.
//!
//! A pass matches the *converted* display text of every visible column
//! case-insensitively, then walks each match's parent chain forcing ancestors
//! visible, expanded, and filter-marked so the match can be revealed.

use std::time::Duration;

use arbor_grid_core::{TimerId, TimerManager};

use crate::model::column::Column;
use crate::model::node::TreeStore;
use crate::model::value::converted_text;

/// Default quiescent period before a search executes.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(500);

/// A scheduled, not-yet-executed search.
#[derive(Debug)]
struct Pending {
    timer: TimerId,
    term: String,
}

/// Debounced search filter over a tree store.
pub struct SearchFilter {
    delay: Duration,
    timers: TimerManager,
    pending: Option<Pending>,
    /// The most recently applied term.
    term: String,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchFilter {
    /// Creates a filter with the default debounce delay.
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_SEARCH_DELAY)
    }

    /// Creates a filter with a custom debounce delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            timers: TimerManager::new(),
            pending: None,
            term: String::new(),
        }
    }

    /// The configured debounce delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the debounce delay for subsequent searches.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// The most recently applied search term (empty when unfiltered).
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Schedules a filter pass for `term`, replacing any pending pass.
    pub fn search(&mut self, term: impl Into<String>) {
        if let Some(pending) = self.pending.take() {
            // The previous pass never ran; its timer may already be gone.
            let _ = self.timers.stop(pending.timer);
        }
        let term = term.into();
        let timer = self.timers.start_one_shot(self.delay);
        self.pending = Some(Pending { timer, term });
    }

    /// Returns `true` if a search is scheduled but has not executed yet.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The term of the scheduled search, if any.
    pub fn pending_term(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.term.as_str())
    }

    /// How long until the scheduled search is due, if any.
    pub fn time_until_ready(&mut self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    /// Runs the scheduled pass if its quiescent period has elapsed.
    ///
    /// Returns `true` when a pass executed; the caller must then recompute
    /// column widths and the scroll window, since the effective row set has
    /// changed.
    pub fn poll(&mut self, store: &mut TreeStore, columns: &[Column]) -> bool {
        if self.pending.is_none() {
            return false;
        }
        let fired = self.timers.process_expired();
        if fired.is_empty() {
            return false;
        }

        let pending = self.pending.take().expect("checked above");
        self.apply(store, columns, &pending.term);
        true
    }

    /// Cancels the debounce and runs any scheduled pass immediately.
    ///
    /// Returns `true` when a pass executed.
    pub fn flush(&mut self, store: &mut TreeStore, columns: &[Column]) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let _ = self.timers.stop(pending.timer);
        self.apply(store, columns, &pending.term);
        true
    }

    fn apply(&mut self, store: &mut TreeStore, columns: &[Column], term: &str) {
        for index in 0..store.len() {
            let node = store.node_mut(index);
            node.show = false;
            node.is_filter = false;
        }

        if term.is_empty() {
            // Full reset: everything becomes visible again, deliberately
            // ignoring per-node expand state.
            for index in 0..store.len() {
                store.node_mut(index).show = true;
            }
        } else {
            let needle = term.to_lowercase();
            let matches: Vec<usize> = (0..store.len())
                .filter(|&index| row_matches(store, index, columns, &needle))
                .collect();

            for &index in &matches {
                let node = store.node_mut(index);
                node.show = true;
                node.is_filter = true;
                show_ancestors(store, index);
            }
            tracing::trace!(
                target: "arbor_grid::filter",
                term,
                matches = matches.len(),
                "filter pass applied"
            );
        }

        self.term = term.to_string();
    }
}

/// Whether any visible column's converted text contains the needle.
fn row_matches(store: &TreeStore, index: usize, columns: &[Column], needle: &str) -> bool {
    let node = store.node_at(index);
    columns
        .iter()
        .filter(|column| !column.is_hidden())
        .any(|column| match node.cell(column.field()) {
            Some(value) if value.is_some() => converted_text(column.kind(), value)
                .to_lowercase()
                .contains(needle),
            _ => false,
        })
}

/// Forces every ancestor of a match visible, expanded, and filter-marked.
fn show_ancestors(store: &mut TreeStore, index: usize) {
    let mut current = store.node_at(index).parent;
    while let Some(parent) = current {
        let node = store.node_mut(parent);
        node.show = true;
        node.expand = true;
        node.is_filter = true;
        current = node.parent;
    }
}
