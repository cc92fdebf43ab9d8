//! Adjacency index: parent -> direct children.

use std::collections::{BTreeSet, HashMap};

use crate::domain::id::ItemId;

/// Children index: `Option<ItemId>` -> Set<ItemId>
///
/// `None` is the root bucket. Siblings iterate in identifier order, which is
/// stable across runs. Empty buckets are dropped eagerly.
#[derive(Debug, Default)]
pub struct ChildIndex {
    index: HashMap<Option<ItemId>, BTreeSet<ItemId>>,
}

impl ChildIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parent: Option<&ItemId>, child: ItemId) {
        self.index.entry(parent.cloned()).or_default().insert(child);
    }

    pub fn remove(&mut self, parent: Option<&ItemId>, child: &ItemId) {
        let key = parent.cloned();
        if let Some(set) = self.index.get_mut(&key) {
            set.remove(child);
            if set.is_empty() {
                self.index.remove(&key);
            }
        }
    }

    /// Drops the bucket keyed by `parent`, returning its members.
    pub fn remove_bucket(&mut self, parent: &ItemId) -> Option<BTreeSet<ItemId>> {
        self.index.remove(&Some(parent.clone()))
    }

    /// Direct children of `parent`; `None` yields the root items.
    pub fn get(&self, parent: Option<&ItemId>) -> impl DoubleEndedIterator<Item = &ItemId> + '_ {
        self.index
            .get(&parent.cloned())
            .into_iter()
            .flat_map(|set| set.iter())
    }

    pub fn has_children(&self, parent: &ItemId) -> bool {
        self.index
            .get(&Some(parent.clone()))
            .is_some_and(|set| !set.is_empty())
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.index.len()
    }
}
