//! Checkbox state and parent/child cascade.
//!
//! Checking a row cascades downward (every descendant takes the new value)
//! and upward (an ancestor is checked iff *all* of its direct children are).
//! A flat ordered set of checked node indices is maintained alongside the
//! per-node flags, and a derived header flag tracks the all-rows-checked
//! state. Single-select mode caps the set at one row and skips the cascade
//! entirely.

use crate::error::GridResult;
use crate::model::node::TreeStore;

/// Checkbox selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckboxMode {
    /// At most one row checked at a time; no cascade.
    Single,
    /// Any number of rows checked, with parent/child cascade.
    #[default]
    Multi,
}

/// Checkbox feature configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxConfig {
    /// Whether the checkbox column is shown at all.
    pub enabled: bool,
    /// Selection mode.
    pub mode: CheckboxMode,
}

impl CheckboxConfig {
    /// Checkbox column disabled.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Multi-select checkboxes with cascade.
    pub fn multi() -> Self {
        Self {
            enabled: true,
            mode: CheckboxMode::Multi,
        }
    }

    /// Single-select checkboxes.
    pub fn single() -> Self {
        Self {
            enabled: true,
            mode: CheckboxMode::Single,
        }
    }
}

/// Checkbox state for a tree store.
#[derive(Debug, Default)]
pub struct CheckModel {
    mode: CheckboxMode,
    /// Checked node indices, in check order.
    checked_rows: Vec<usize>,
    /// The row checked most recently; single mode unchecks it on new checks.
    prev_checked: Option<usize>,
    /// Derived convenience flag: all rows checked.
    header_checked: bool,
}

impl CheckModel {
    /// Creates a check model with the given mode.
    pub fn new(mode: CheckboxMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// The checked node indices, in check order.
    pub fn checked_rows(&self) -> &[usize] {
        &self.checked_rows
    }

    /// Whether every row in the store is checked.
    pub fn is_header_checked(&self) -> bool {
        self.header_checked
    }

    /// Re-derives checkbox state after a store rebuild, honoring any
    /// preset-checked rows in the new dataset.
    pub(crate) fn rebuild_from(&mut self, store: &TreeStore) {
        self.checked_rows = store
            .nodes()
            .filter(|node| node.is_checked())
            .map(|node| node.index())
            .collect();
        self.prev_checked = None;
        self.header_checked = !store.is_empty() && self.checked_rows.len() == store.len();
    }

    /// Sets a row's checked state and cascades.
    pub fn check(&mut self, store: &mut TreeStore, index: usize, value: bool) -> GridResult<()> {
        store.get(index)?;

        // Single mode unchecks the previously checked row first.
        if self.mode == CheckboxMode::Single
            && !self.checked_rows.is_empty()
            && let Some(prev) = self.prev_checked
            && prev != index
        {
            store.node_mut(prev).checked = false;
        }

        store.node_mut(index).checked = value;

        if value {
            match self.mode {
                CheckboxMode::Single => self.checked_rows = vec![index],
                CheckboxMode::Multi => {
                    self.cascade_children(store, index);
                    self.cascade_parent(store, index);
                    self.insert_checked(index);
                }
            }
            if self.checked_rows.len() == store.len() {
                self.header_checked = true;
            }
        } else {
            if self.header_checked {
                self.header_checked = false;
            }
            match self.mode {
                CheckboxMode::Single => self.checked_rows.clear(),
                CheckboxMode::Multi => {
                    self.checked_rows.retain(|&row| row != index);
                    self.cascade_children(store, index);
                    self.cascade_parent(store, index);
                }
            }
        }

        self.prev_checked = Some(index);
        Ok(())
    }

    /// Toggles every row in the store, filtered-out rows included.
    ///
    /// The whole unfiltered arena flips to the complement of the current
    /// header state, and the checked set becomes exactly the full row list
    /// or empty.
    pub fn check_all(&mut self, store: &mut TreeStore) {
        self.header_checked = !self.header_checked;
        let status = self.header_checked;

        let mut checked = Vec::new();
        for index in 0..store.len() {
            if status {
                checked.push(index);
            }
            store.node_mut(index).checked = status;
        }
        self.checked_rows = checked;
    }

    /// Propagates a node's checked value to every descendant, keeping the
    /// checked set in sync.
    fn cascade_children(&mut self, store: &mut TreeStore, index: usize) {
        let value = store.node_at(index).checked;
        let children = store.node_at(index).children.clone();
        for child in children {
            if value {
                self.insert_checked(child);
            } else {
                self.checked_rows.retain(|&row| row != child);
            }
            store.node_mut(child).checked = value;

            if store.node_at(child).has_child {
                self.cascade_children(store, child);
            }
        }
    }

    /// Re-derives each ancestor as the AND of its direct children, up to the
    /// root. A node without a parent ends the walk.
    fn cascade_parent(&mut self, store: &mut TreeStore, index: usize) {
        let Some(parent) = store.node_at(index).parent else {
            return;
        };

        let children = store.node_at(parent).children.clone();
        let all_checked = children.iter().all(|&child| store.node_at(child).checked);
        store.node_mut(parent).checked = all_checked;

        if all_checked {
            self.insert_checked(parent);
        } else {
            self.checked_rows.retain(|&row| row != parent);
        }

        self.cascade_parent(store, parent);
    }

    fn insert_checked(&mut self, index: usize) {
        if !self.checked_rows.contains(&index) {
            self.checked_rows.push(index);
        }
    }
}
