//! Memoized descendant listings.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::id::ItemId;

/// Descendant cache: ItemId -> every descendant identifier.
///
/// Only identifiers are kept. Queries resolve them against the registry on
/// each read, so a cached listing never carries stale payload; it only has
/// to be dropped when subtree membership changes.
#[derive(Debug, Default)]
pub struct DescendantCache {
    entries: HashMap<ItemId, Arc<[ItemId]>>,
}

impl DescendantCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ItemId) -> Option<Arc<[ItemId]>> {
        self.entries.get(id).cloned()
    }

    pub fn insert(&mut self, id: ItemId, descendants: impl Into<Arc<[ItemId]>>) {
        self.entries.insert(id, descendants.into());
    }

    pub fn remove(&mut self, id: &ItemId) {
        self.entries.remove(id);
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the entry of `start` and of every ancestor above it.
    ///
    /// `parent_of` follows one parent link; the walk ends at the root
    /// sentinel (`None`). A revisited id means the parent links loop, which
    /// only untrusted initial data can produce; the walk stops there.
    pub fn invalidate_from<'a, F>(&mut self, start: Option<&'a ItemId>, parent_of: F)
    where
        F: Fn(&ItemId) -> Option<&'a ItemId>,
    {
        let mut seen: HashSet<&ItemId> = HashSet::new();
        let mut current = start;

        while let Some(id) = current {
            if !seen.insert(id) {
                warn!("parent links loop at {}, stopping cache invalidation", id);
                break;
            }
            if self.entries.remove(id).is_some() {
                debug!("invalidated descendant cache for {}", id);
            }
            current = parent_of(id);
        }
    }
}
