//! Flattened tree storage.
//!
//! [`TreeStore`] flattens the nested source dataset into an arena of
//! [`Node`]s ordered by depth-first pre-order. A node's position in the arena
//! *is* its index, and parent/child links are stored as arena indices, so
//! upward and downward traversal are plain lookups with no reference cycles.
//!
//! The arena is rebuilt wholesale whenever the source dataset changes;
//! between rebuilds only the per-node state flags mutate, and no node is ever
//! removed or re-indexed.

use std::collections::HashMap;

use crate::error::{GridError, GridResult};
use crate::model::row::RowData;
use crate::model::value::CellValue;

/// One flattened tree row with computed index, level, and state flags.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) index: usize,
    pub(crate) level: usize,
    pub(crate) checked: bool,
    pub(crate) show: bool,
    pub(crate) expand: bool,
    pub(crate) is_filter: bool,
    pub(crate) has_child: bool,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) cells: HashMap<String, CellValue>,
}

impl Node {
    /// The node's depth-first pre-order index, stable until the next rebuild.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Depth from the root (root = 0).
    pub fn level(&self) -> usize {
        self.level
    }

    /// Whether the node's checkbox is checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Whether the node is currently visible (an "effective" row).
    pub fn is_shown(&self) -> bool {
        self.show
    }

    /// Whether the node's children are expanded.
    pub fn is_expanded(&self) -> bool {
        self.expand
    }

    /// Whether the node is visible because of an active search filter.
    pub fn is_filter_hit(&self) -> bool {
        self.is_filter
    }

    /// Whether the node has child rows.
    pub fn has_children(&self) -> bool {
        self.has_child
    }

    /// The parent node's index, or `None` for the root.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Indices of the node's direct children, in source order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// The node's payload: its own cell values, children excluded.
    pub fn cells(&self) -> &HashMap<String, CellValue> {
        &self.cells
    }

    /// Returns the cell value for a field, if present.
    pub fn cell(&self, field: &str) -> Option<&CellValue> {
        self.cells.get(field)
    }
}

/// Arena of flattened tree nodes.
#[derive(Debug, Default)]
pub struct TreeStore {
    nodes: Vec<Node>,
}

impl TreeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the arena from the source dataset.
    ///
    /// Flattening walks the first root record depth-first in pre-order,
    /// assigning each node the next index from a counter starting at 0.
    /// Preset flags on a row are honored; everything else is backfilled:
    /// `checked = false`, `expand = true`, and `show` inherited as
    /// `parent.show && parent.expand` (the root is shown).
    ///
    /// The input must be an acyclic tree; recursion depth equals tree depth.
    pub fn rebuild(&mut self, rows: &[RowData]) {
        self.nodes.clear();
        if let Some(root) = rows.first() {
            self.flatten(root, 0, true, None);
        }
        tracing::debug!(target: "arbor_grid::tree", nodes = self.nodes.len(), "tree store rebuilt");
    }

    fn flatten(&mut self, row: &RowData, level: usize, inherited_show: bool, parent: Option<usize>) {
        let index = self.nodes.len();
        let show = row.preset_show().unwrap_or(inherited_show);
        let expand = row.preset_expand().unwrap_or(true);
        let has_child = !row.children().is_empty();

        self.nodes.push(Node {
            index,
            level,
            checked: row.preset_checked().unwrap_or(false),
            show,
            expand,
            is_filter: false,
            has_child,
            parent,
            children: Vec::with_capacity(row.children().len()),
            cells: row.cells().clone(),
        });

        if let Some(parent) = parent {
            self.nodes[parent].children.push(index);
        }

        for child in row.children() {
            self.flatten(child, level + 1, show && expand, Some(index));
        }
    }

    /// The total number of nodes, visible or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at `index`, if it exists.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Iterates over all nodes in pre-order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Indices of the currently visible ("effective") rows, in pre-order.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .filter(|node| node.show)
            .map(|node| node.index)
            .collect()
    }

    pub(crate) fn get(&self, index: usize) -> GridResult<&Node> {
        self.nodes.get(index).ok_or(GridError::NodeIndex {
            index,
            len: self.nodes.len(),
        })
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> GridResult<&mut Node> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(index)
            .ok_or(GridError::NodeIndex { index, len })
    }

    pub(crate) fn node_at(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }

    /// Toggles a node's expansion and recomputes descendant visibility.
    ///
    /// Collapsing hides the whole subtree. Expanding reveals descendants only
    /// along chains that are themselves expanded, except under an active
    /// filter where a node's own filter hit decides its visibility.
    pub fn toggle_expand(&mut self, index: usize) -> GridResult<()> {
        let node = self.get_mut(index)?;
        node.expand = !node.expand;
        let shown = node.expand;
        let is_filter = node.is_filter;
        let children = node.children.clone();
        self.propagate_expand(&children, shown, is_filter);
        Ok(())
    }

    fn propagate_expand(&mut self, children: &[usize], shown: bool, parent_filter: bool) {
        for &child in children {
            let node = &mut self.nodes[child];
            node.show = if parent_filter && shown {
                node.is_filter
            } else {
                shown
            };
            if node.has_child {
                let next_shown = node.show && node.expand;
                let next_filter = node.is_filter;
                let grandchildren = node.children.clone();
                self.propagate_expand(&grandchildren, next_shown, next_filter);
            }
        }
    }
}
