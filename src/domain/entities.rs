//! Domain entities: core data structures

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::id::ItemId;

/// A record that can live in a [`TreeStore`](crate::domain::TreeStore).
///
/// The store only looks at the identifier and the parent link. The label is
/// carried for display; any further fields are opaque to the store.
pub trait TreeItem {
    fn id(&self) -> &ItemId;

    /// Parent identifier, `None` for a root item.
    fn parent(&self) -> Option<&ItemId>;

    fn label(&self) -> &str;
}

/// Default item record used by the document loader and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ItemId>,
    pub label: String,
    /// Free-form payload, ignored by the store
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, parent: Option<ItemId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent,
            label: label.into(),
            meta: BTreeMap::new(),
        }
    }

    /// Item without a parent.
    pub fn root(id: impl Into<ItemId>, label: impl Into<String>) -> Self {
        Self::new(id, None, label)
    }

    pub fn child(
        id: impl Into<ItemId>,
        parent: impl Into<ItemId>,
        label: impl Into<String>,
    ) -> Self {
        Self::new(id, Some(parent.into()), label)
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

impl TreeItem for Item {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn parent(&self) -> Option<&ItemId> {
        self.parent.as_ref()
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}
