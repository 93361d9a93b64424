//! Drill-down navigation over a [`HierarchyTable`]

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::hierarchy::{HierarchyRow, HierarchyTable};
use crate::path::ActivePath;
use crate::view::NavView;
use crate::MAX_DEPTH;

/// A single state change requested by the user
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavAction {
    /// Replace the path with a single level-1 label
    SelectRoot(String),
    /// Keep the path up to and including this 0-based index
    SelectAncestor(usize),
    /// Append a child of the deepest selected node
    SelectChild(String),
    /// Clear the path
    Reset,
}

/// Children and exact-match rows of one node, computed in a single scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView<'t> {
    /// Distinct labels one level below the node, sorted ascending
    pub children: Vec<&'t str>,
    /// Rows whose hierarchy ends exactly at the node
    pub exact_rows: Vec<&'t HierarchyRow>,
}

/// Navigation operations against a shared, read-only table.
///
/// A `Navigator` holds no session state; each session owns its own
/// [`ActivePath`] and passes it in.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'t> {
    table: &'t HierarchyTable,
}

impl<'t> Navigator<'t> {
    /// Create a navigator over a loaded table
    pub fn new(table: &'t HierarchyTable) -> Self {
        Self { table }
    }

    /// The table being navigated
    pub fn table(&self) -> &'t HierarchyTable {
        self.table
    }

    /// Set the path to `[label]`. The label must be a level-1 value.
    pub fn select_root(&self, path: &mut ActivePath, label: &str) -> Result<()> {
        if !self.table.rows().iter().any(|r| r.level(0) == Some(label)) {
            return Err(Error::UnknownLabel {
                label: label.to_string(),
                level: 1,
            });
        }
        path.set_root(label);
        Ok(())
    }

    /// Truncate the path so that `index` is its last element
    pub fn select_ancestor(&self, path: &mut ActivePath, index: usize) -> Result<()> {
        if index >= path.len() {
            return Err(Error::AncestorOutOfRange {
                index,
                len: path.len(),
            });
        }
        path.truncate(index + 1);
        Ok(())
    }

    /// Append a child of the deepest selected node
    pub fn select_child(&self, path: &mut ActivePath, label: &str) -> Result<()> {
        if path.is_full() {
            return Err(Error::DepthExceeded(MAX_DEPTH));
        }
        let depth = path.len();
        let reachable = self
            .table
            .rows()
            .iter()
            .any(|r| r.level(depth) == Some(label) && r.matches_prefix(path.labels()));
        if !reachable {
            return Err(Error::UnknownLabel {
                label: label.to_string(),
                level: depth + 1,
            });
        }
        path.push(label);
        Ok(())
    }

    /// Clear the path
    pub fn reset(&self, path: &mut ActivePath) {
        path.clear();
    }

    /// Apply one user action. A rejected action leaves the path unchanged.
    pub fn apply(&self, path: &mut ActivePath, action: &NavAction) -> Result<()> {
        match action {
            NavAction::SelectRoot(label) => self.select_root(path, label),
            NavAction::SelectAncestor(index) => self.select_ancestor(path, *index),
            NavAction::SelectChild(label) => self.select_child(path, label),
            NavAction::Reset => {
                self.reset(path);
                Ok(())
            }
        }
    }

    /// Compute children and exact matches of the node at `path` in one pass
    pub fn node(&self, path: &ActivePath) -> NodeView<'t> {
        let depth = path.len();
        let mut children = BTreeSet::new();
        let mut exact_rows = Vec::new();

        for row in self.table.rows() {
            if !row.matches_prefix(path.labels()) {
                continue;
            }
            if let Some(label) = row.level(depth) {
                children.insert(label);
            }
            if row.terminates_at(depth) {
                exact_rows.push(row);
            }
        }

        NodeView {
            children: children.into_iter().collect(),
            exact_rows,
        }
    }

    /// Distinct labels one level below `path`, sorted ascending.
    ///
    /// Empty when the path is full or matches no rows.
    pub fn compute_children(&self, path: &ActivePath) -> Vec<&'t str> {
        self.node(path).children
    }

    /// Rows that match `path` and have no deeper level populated
    pub fn compute_exact_matches(&self, path: &ActivePath) -> Vec<&'t HierarchyRow> {
        self.node(path).exact_rows
    }

    /// Build the render model for `path`
    pub fn view(&self, path: &ActivePath) -> NavView<'t> {
        NavView::build(path, self.node(path))
    }
}
