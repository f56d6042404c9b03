//! Source row records.
//!
//! A [`RowData`] is one entry of the nested dataset handed to the grid: a bag
//! of named cell values plus an ordered list of child rows. Rows may carry
//! preset state flags; flattening honors them and only backfills the flags a
//! row does not set itself.

use std::collections::HashMap;

use super::value::CellValue;

/// One record of the source tree dataset.
#[derive(Debug, Clone, Default)]
pub struct RowData {
    cells: HashMap<String, CellValue>,
    children: Vec<RowData>,
    checked: Option<bool>,
    show: Option<bool>,
    expand: Option<bool>,
}

impl RowData {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell value under the given field name.
    pub fn with_cell(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(field.into(), value.into());
        self
    }

    /// Appends a child row.
    pub fn with_child(mut self, child: RowData) -> Self {
        self.children.push(child);
        self
    }

    /// Presets the checked flag; flattening will not overwrite it.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Presets the visibility flag; flattening will not overwrite it.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = Some(show);
        self
    }

    /// Presets the expansion flag; flattening will not overwrite it.
    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = Some(expand);
        self
    }

    /// Returns the cell value for a field, if present.
    pub fn cell(&self, field: &str) -> Option<&CellValue> {
        self.cells.get(field)
    }

    /// Returns all cell values.
    pub fn cells(&self) -> &HashMap<String, CellValue> {
        &self.cells
    }

    /// Returns the child rows.
    pub fn children(&self) -> &[RowData] {
        &self.children
    }

    pub(crate) fn preset_checked(&self) -> Option<bool> {
        self.checked
    }

    pub(crate) fn preset_show(&self) -> Option<bool> {
        self.show
    }

    pub(crate) fn preset_expand(&self) -> Option<bool> {
        self.expand
    }
}
