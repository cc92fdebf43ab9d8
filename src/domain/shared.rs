//! Thread-shareable store handle.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::entities::{Item, TreeItem};
use crate::domain::store::TreeStore;

/// Cloneable handle that serializes every access to one [`TreeStore`].
///
/// Registry, children index and cache are only consistent together, so a
/// single lock guards all of them, queries included (a query may fill the
/// cache).
#[derive(Debug)]
pub struct SharedTreeStore<T: TreeItem = Item> {
    inner: Arc<Mutex<TreeStore<T>>>,
}

impl<T: TreeItem> Clone for SharedTreeStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: TreeItem> From<TreeStore<T>> for SharedTreeStore<T> {
    fn from(store: TreeStore<T>) -> Self {
        Self::new(store)
    }
}

impl<T: TreeItem> SharedTreeStore<T> {
    pub fn new(store: TreeStore<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with the lock held; results must not borrow from the store.
    pub fn read<R>(&self, f: impl FnOnce(&TreeStore<T>) -> R) -> R {
        f(&*self.inner.lock())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut TreeStore<T>) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}
