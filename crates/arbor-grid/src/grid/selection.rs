//! Row selection and context-menu state.
//!
//! Selection is a single optional row: clicks update it when row selection
//! is enabled, double-clicks always do. The context menu is rebuilt from
//! caller-supplied custom items whenever it is requested over a row; each
//! item's `disabled` flag is derived from its `validate` predicate against
//! the selected row.

use std::fmt;
use std::sync::Arc;

use crate::error::GridResult;
use crate::model::{Node, TreeStore};

/// Payload describing where a row was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickedRow {
    /// The clicked node's index.
    pub row: usize,
    /// The field of the clicked cell, when known.
    pub field: Option<String>,
    /// The column index of the clicked cell, when known.
    pub column: Option<usize>,
}

/// Single-row selection state.
#[derive(Debug, Default)]
pub struct RowSelection {
    enabled: bool,
    selected: Option<usize>,
}

impl RowSelection {
    /// Creates selection state; `enabled` gates click selection.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            selected: None,
        }
    }

    /// Whether click selection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The currently selected node index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Handles a row click. Returns `true` when the selection changed.
    pub fn click(&mut self, store: &TreeStore, index: usize) -> GridResult<bool> {
        store.get(index)?;
        if !self.enabled {
            return Ok(false);
        }
        self.selected = Some(index);
        Ok(true)
    }

    /// Handles a row double-click; always selects.
    pub fn double_click(&mut self, store: &TreeStore, index: usize) -> GridResult<()> {
        store.get(index)?;
        self.selected = Some(index);
        Ok(())
    }

    pub(crate) fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub(crate) fn clear(&mut self) {
        self.selected = None;
    }
}

/// Predicate deciding whether a menu item applies to a row.
pub type MenuValidator = Arc<dyn Fn(&str, &Node) -> bool + Send + Sync>;

/// One caller-supplied context-menu entry.
#[derive(Clone)]
pub struct ContextMenuItem {
    item_id: String,
    label: String,
    validate: Option<MenuValidator>,
    disabled: bool,
}

impl ContextMenuItem {
    /// Creates an always-enabled item.
    pub fn new(item_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            label: label.into(),
            validate: None,
            disabled: false,
        }
    }

    /// Attaches a validation predicate; items failing it render disabled.
    pub fn with_validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&str, &Node) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validate));
        self
    }

    /// The item's identifier, passed back to the validator.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// The display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the item is disabled for the current selection.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl fmt::Debug for ContextMenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenuItem")
            .field("item_id", &self.item_id)
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .field("has_validate", &self.validate.is_some())
            .finish()
    }
}

/// Context-menu state: the configured custom items plus the list built for
/// the most recent request.
#[derive(Debug, Default)]
pub struct ContextMenu {
    custom_items: Vec<ContextMenuItem>,
    items: Vec<ContextMenuItem>,
}

impl ContextMenu {
    /// Creates a menu with the given custom items.
    pub fn new(custom_items: Vec<ContextMenuItem>) -> Self {
        Self {
            custom_items,
            items: Vec::new(),
        }
    }

    /// The items built for the most recent request.
    pub fn items(&self) -> &[ContextMenuItem] {
        &self.items
    }

    /// Rebuilds the menu for the given row.
    ///
    /// With a row, custom items are included and each `disabled` flag is
    /// re-derived from its validator. Without one (the request landed on
    /// empty space), the menu is built without custom items.
    pub fn build(&mut self, row: Option<&Node>) {
        let mut items = Vec::new();
        if let Some(row) = row
            && !self.custom_items.is_empty()
        {
            for item in &self.custom_items {
                let mut item = item.clone();
                if let Some(validate) = &item.validate {
                    item.disabled = !validate(&item.item_id, row);
                }
                items.push(item);
            }
        }
        self.items = items;
    }
}
