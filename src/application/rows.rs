//! Grid rows: the read-only view a table component renders.
//!
//! Everything here is derived from `all_parents` and `children`; the store
//! needs no extra API for it.

use itertools::Itertools;

use crate::domain::{ItemId, TreeItem, TreeStore};

/// Whether a row groups other rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowCategory {
    /// Item has at least one child
    Group,
    Leaf,
}

impl RowCategory {
    /// Category column text: `group_label` for groups, nothing for leaves.
    pub fn display<'a>(&self, group_label: &'a str) -> Option<&'a str> {
        match self {
            RowCategory::Group => Some(group_label),
            RowCategory::Leaf => None,
        }
    }
}

/// One row of a tree grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub id: ItemId,
    pub label: String,
    /// Identifiers from the topmost ancestor down to this item, as strings
    pub data_path: Vec<String>,
    pub category: RowCategory,
}

impl GridRow {
    pub fn from_item<T: TreeItem>(store: &TreeStore<T>, item: &T) -> Self {
        let data_path = store
            .path(item.id())
            .iter()
            .map(ItemId::to_string)
            .collect();
        let category = if store.has_children(item.id()) {
            RowCategory::Group
        } else {
            RowCategory::Leaf
        };
        Self {
            id: item.id().clone(),
            label: item.label().to_string(),
            data_path,
            category,
        }
    }

    /// Number of ancestors above this row.
    pub fn depth(&self) -> usize {
        self.data_path.len().saturating_sub(1)
    }

    pub fn display_path(&self, separator: &str) -> String {
        self.data_path.iter().join(separator)
    }
}

/// Rows for every live item, in store order.
pub fn build_rows<T: TreeItem>(store: &TreeStore<T>) -> Vec<GridRow> {
    store
        .iter()
        .map(|item| GridRow::from_item(store, item))
        .collect()
}
