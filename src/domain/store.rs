//! Hierarchical item store.
//!
//! Composes the arena registry, the children index and the descendant cache
//! over one owned state. Mutations validate first and commit second, so a
//! rejected call leaves all three structures untouched.

use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::domain::arena::{ItemArena, ItemIter};
use crate::domain::cache::DescendantCache;
use crate::domain::children::ChildIndex;
use crate::domain::entities::{Item, TreeItem};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::id::ItemId;

/// Flat collection of parent-linked items with tree queries.
///
/// Queries take `&self`; the descendant cache is filled lazily behind a
/// `RefCell`, which makes the store `Send` but not `Sync`. Use
/// [`SharedTreeStore`](crate::domain::SharedTreeStore) to share one store
/// between threads.
#[derive(Debug)]
pub struct TreeStore<T: TreeItem = Item> {
    registry: ItemArena<T>,
    children: ChildIndex,
    cache: RefCell<DescendantCache>,
}

impl<T: TreeItem> Default for TreeStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: TreeItem> FromIterator<T> for TreeStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: TreeItem> TreeStore<T> {
    /// Builds registry and children index in one pass.
    ///
    /// The input is trusted to be acyclic and is not checked. A repeated
    /// identifier keeps the first record; later ones are dropped with a
    /// warning.
    pub fn new<I: IntoIterator<Item = T>>(items: I) -> Self {
        let items = items.into_iter();
        let mut registry = ItemArena::with_capacity(items.size_hint().0);
        let mut children = ChildIndex::new();

        for item in items {
            let id = item.id().clone();
            let parent = item.parent().cloned();
            match registry.insert(item) {
                Ok(_) => children.insert(parent.as_ref(), id),
                Err(dup) => warn!("skipping duplicate item {}", dup.id()),
            }
        }
        debug!(
            "built store: {} items, {} parent buckets",
            registry.len(),
            children.bucket_count()
        );

        Self {
            registry,
            children,
            cache: RefCell::new(DescendantCache::new()),
        }
    }

    /* ------------------------ queries ------------------------ */

    /// All live items in insertion order, removals filtered out.
    pub fn all(&self) -> Vec<&T> {
        self.registry.iter().collect()
    }

    pub fn iter(&self) -> ItemIter<'_, T> {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.registry.contains(id)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: &ItemId) -> Option<&T> {
        self.registry.get(id)
    }

    /// Direct children of `id` in sibling order. Empty for leaves and
    /// unknown ids.
    #[instrument(level = "trace", skip(self))]
    pub fn children(&self, id: &ItemId) -> Vec<&T> {
        self.children
            .get(Some(id))
            .filter_map(|child| self.registry.get(child))
            .collect()
    }

    pub fn has_children(&self, id: &ItemId) -> bool {
        self.children.has_children(id)
    }

    /// Items without a live parent, in insertion order.
    pub fn roots(&self) -> Vec<&T> {
        self.registry
            .iter()
            .filter(|item| item.parent().map_or(true, |p| !self.registry.contains(p)))
            .collect()
    }

    /// Every descendant of `id` at any depth, each exactly once.
    ///
    /// Depth-first pre-order with siblings in index order. The identifier
    /// listing is memoized per live id until a structural change below it.
    #[instrument(level = "trace", skip(self))]
    pub fn all_children(&self, id: &ItemId) -> Vec<&T> {
        self.resolve(&self.descendant_ids(id))
    }

    /// Ancestors of `id`, nearest parent first, root last.
    ///
    /// Empty for roots and unknown ids. The walk stops at a parent id that is
    /// not live.
    #[instrument(level = "trace", skip(self))]
    pub fn all_parents(&self, id: &ItemId) -> Vec<&T> {
        let mut result = Vec::new();
        let mut seen: HashSet<&ItemId> = HashSet::new();
        seen.insert(id);
        let mut current = self.registry.parent_of(id);

        while let Some(parent_id) = current {
            let Some(parent) = self.registry.get(parent_id) else {
                break;
            };
            if !seen.insert(parent_id) {
                warn!("parent links loop at {}, truncating ancestors of {}", parent_id, id);
                break;
            }
            result.push(parent);
            current = parent.parent();
        }
        result
    }

    /// Identifiers from the topmost ancestor down to `id` itself.
    ///
    /// Empty for unknown ids.
    pub fn path(&self, id: &ItemId) -> Vec<ItemId> {
        if !self.registry.contains(id) {
            return Vec::new();
        }
        let mut path: Vec<ItemId> = self
            .all_parents(id)
            .into_iter()
            .rev()
            .map(|item| item.id().clone())
            .collect();
        path.push(id.clone());
        path
    }

    /// Number of ancestors of a live item; `0` for a root.
    pub fn depth(&self, id: &ItemId) -> Option<usize> {
        self.registry
            .contains(id)
            .then(|| self.all_parents(id).len())
    }

    /// Whether a descendant listing for `id` is currently memoized.
    pub fn is_cached(&self, id: &ItemId) -> bool {
        self.cache.borrow().contains(id)
    }

    /* ------------------------ mutations ------------------------ */

    /// Inserts a new item under its declared parent.
    ///
    /// # Errors
    /// - [`DomainError::DuplicateIdentifier`] if the id is live
    /// - [`DomainError::SelfParent`] if the item names itself as parent
    /// - [`DomainError::CircularDependency`] if the parent is an orphan that
    ///   already hangs below the new id
    #[instrument(level = "debug", skip_all, fields(id = %item.id()))]
    pub fn add(&mut self, item: T) -> DomainResult<()> {
        let id = item.id().clone();
        if self.registry.contains(&id) {
            return Err(DomainError::DuplicateIdentifier(id));
        }
        let parent = item.parent().cloned();
        self.check_parent(&id, parent.as_ref())?;

        self.registry
            .insert(item)
            .map_err(|item| DomainError::DuplicateIdentifier(item.id().clone()))?;
        self.children.insert(parent.as_ref(), id.clone());
        self.invalidate_from(parent.as_ref());

        debug!("added {} under {:?}", id, parent);
        Ok(())
    }

    /// Replaces the stored record of `updated.id()`, re-parenting if needed.
    ///
    /// Unknown ids are ignored. The record keeps its slot and its position
    /// in [`Self::all`].
    ///
    /// # Errors
    /// - [`DomainError::SelfParent`] if the new parent is the item itself
    /// - [`DomainError::CircularDependency`] if the new parent is one of the
    ///   item's descendants
    #[instrument(level = "debug", skip_all, fields(id = %updated.id()))]
    pub fn update(&mut self, updated: T) -> DomainResult<()> {
        let id = updated.id().clone();
        let Some(existing) = self.registry.get(&id) else {
            debug!("ignoring update of unknown item {}", id);
            return Ok(());
        };
        let old_parent = existing.parent().cloned();
        let new_parent = updated.parent().cloned();

        if old_parent != new_parent {
            self.check_parent(&id, new_parent.as_ref())?;

            self.children.remove(old_parent.as_ref(), &id);
            self.children.insert(new_parent.as_ref(), id.clone());
            self.invalidate_from(old_parent.as_ref());
            self.invalidate_from(new_parent.as_ref());
            debug!("moved {} from {:?} to {:?}", id, old_parent, new_parent);
        } else {
            self.invalidate_from(Some(&id));
        }

        self.registry.replace(updated).ok();
        Ok(())
    }

    /// Removes `id` together with its whole subtree.
    ///
    /// Returns the removed records, target first; empty for unknown ids.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: &ItemId) -> Vec<T> {
        let Some(target) = self.registry.get(id) else {
            debug!("ignoring removal of unknown item {}", id);
            return Vec::new();
        };
        let target_parent = target.parent().cloned();

        let mut doomed = vec![id.clone()];
        doomed.extend(self.collect_descendants(id));

        let mut removed = Vec::with_capacity(doomed.len());
        let cache = self.cache.get_mut();
        for doomed_id in &doomed {
            let Some(item) = self.registry.remove(doomed_id) else {
                continue;
            };
            self.children.remove(item.parent(), doomed_id);
            self.children.remove_bucket(doomed_id);
            cache.remove(doomed_id);
            removed.push(item);
        }
        self.registry.retain_live();
        self.invalidate_from(target_parent.as_ref());

        debug!("removed {} items rooted at {}", removed.len(), id);
        removed
    }

    /* ------------------------ internals ------------------------ */

    /// Rejects a parent link that would close a loop through `id`.
    ///
    /// Walks up from the prospective parent: meeting `id` on the way means
    /// the parent already sits in the subtree of `id`.
    fn check_parent(&self, id: &ItemId, new_parent: Option<&ItemId>) -> DomainResult<()> {
        let Some(parent) = new_parent else {
            return Ok(());
        };
        if parent == id {
            return Err(DomainError::SelfParent(id.clone()));
        }

        let mut seen: HashSet<&ItemId> = HashSet::new();
        let mut current = Some(parent);
        while let Some(ancestor) = current {
            if ancestor == id {
                return Err(DomainError::CircularDependency {
                    id: id.clone(),
                    parent: parent.clone(),
                });
            }
            if !seen.insert(ancestor) {
                break;
            }
            current = self.registry.parent_of(ancestor);
        }
        Ok(())
    }

    fn descendant_ids(&self, id: &ItemId) -> Arc<[ItemId]> {
        if let Some(ids) = self.cache.borrow().get(id) {
            return ids;
        }
        let ids: Arc<[ItemId]> = self.collect_descendants(id).into();
        if self.registry.contains(id) {
            self.cache.borrow_mut().insert(id.clone(), Arc::clone(&ids));
        }
        ids
    }

    /// Stack-based walk of the children index below `id`.
    fn collect_descendants(&self, id: &ItemId) -> Vec<ItemId> {
        let mut result = Vec::new();
        let mut seen: HashSet<&ItemId> = HashSet::new();
        seen.insert(id);
        let mut stack: Vec<&ItemId> = self.children.get(Some(id)).rev().collect();

        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                warn!("parent links loop at {}, skipping revisit below {}", current, id);
                continue;
            }
            result.push(current.clone());
            // Reversed so siblings pop in index order
            stack.extend(self.children.get(Some(current)).rev());
        }
        result
    }

    fn resolve(&self, ids: &[ItemId]) -> Vec<&T> {
        ids.iter().filter_map(|id| self.registry.get(id)).collect()
    }

    fn invalidate_from(&mut self, start: Option<&ItemId>) {
        let registry = &self.registry;
        self.cache
            .get_mut()
            .invalidate_from(start, |id| registry.parent_of(id));
    }
}
