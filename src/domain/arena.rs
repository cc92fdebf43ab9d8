use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::TreeItem;
use crate::domain::id::ItemId;

/// Arena-backed item registry.
///
/// Items live in a generational arena so that a slot handed out for an item
/// stays valid for exactly as long as the item is live. A hash map resolves
/// identifiers to slots and a separate vector records insertion order for
/// stable enumeration.
#[derive(Debug)]
pub struct ItemArena<T> {
    /// Slot storage for all live items
    arena: Arena<T>,
    /// Identifier to slot lookup
    index: HashMap<ItemId, Index>,
    /// Slots in insertion order; may hold freed slots until `retain_live`
    order: Vec<Index>,
}

impl<T: TreeItem> Default for ItemArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TreeItem> ItemArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Registers `item` at the end of the sequence.
    ///
    /// Hands the item back if its identifier is already taken.
    #[instrument(level = "trace", skip_all, fields(id = %item.id()))]
    pub fn insert(&mut self, item: T) -> Result<Index, T> {
        if self.index.contains_key(item.id()) {
            return Err(item);
        }
        let id = item.id().clone();
        let idx = self.arena.insert(item);
        self.index.insert(id, idx);
        self.order.push(idx);
        Ok(idx)
    }

    pub fn get(&self, id: &ItemId) -> Option<&T> {
        self.index.get(id).and_then(|&idx| self.arena.get(idx))
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    /// Parent link of a live item, `None` for roots and unknown ids.
    pub fn parent_of(&self, id: &ItemId) -> Option<&ItemId> {
        self.get(id).and_then(|item| item.parent())
    }

    /// Overwrites the record in its existing slot and returns the old one.
    ///
    /// The identifier of `item` must already be registered; unknown ids are
    /// handed back untouched.
    #[instrument(level = "trace", skip_all, fields(id = %item.id()))]
    pub fn replace(&mut self, item: T) -> Result<T, T> {
        match self
            .index
            .get(item.id())
            .and_then(|&idx| self.arena.get_mut(idx))
        {
            Some(slot) => Ok(std::mem::replace(slot, item)),
            None => Err(item),
        }
    }

    /// Frees the slot of `id`.
    ///
    /// The insertion-order vector is left alone; call [`Self::retain_live`]
    /// once a batch of removals is done.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, id: &ItemId) -> Option<T> {
        let idx = self.index.remove(id)?;
        self.arena.remove(idx)
    }

    /// Drops freed slots from the insertion-order vector.
    pub fn retain_live(&mut self) {
        let arena = &self.arena;
        self.order.retain(|&idx| arena.contains(idx));
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Live items in insertion order.
    pub fn iter(&self) -> ItemIter<'_, T> {
        ItemIter {
            arena: &self.arena,
            order: self.order.iter(),
        }
    }
}

pub struct ItemIter<'a, T> {
    arena: &'a Arena<T>,
    order: std::slice::Iter<'a, Index>,
}

impl<'a, T> Iterator for ItemIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        // Freed slots are skipped until the order vector is compacted
        self.order.by_ref().find_map(|&idx| arena.get(idx))
    }
}
