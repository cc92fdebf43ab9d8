//! Hierarchical item store.
//!
//! Items are flat records that name one parent each. [`TreeStore`] indexes
//! them for constant-time lookup, direct-children and full-subtree queries
//! and ancestor chains, and keeps those indices consistent across `add`,
//! `update` (including re-parenting) and cascading `remove`.
//!
//! ```
//! use treestore::{Item, ItemId, TreeStore};
//!
//! let mut store = TreeStore::new(vec![
//!     Item::root(1, "Root"),
//!     Item::child("91064cee", 1, "Child"),
//!     Item::child(3, "91064cee", "Grandchild"),
//! ]);
//!
//! let parents: Vec<_> = store.all_parents(&ItemId::from(3)).iter().map(|i| i.id.clone()).collect();
//! assert_eq!(parents, vec![ItemId::from("91064cee"), ItemId::from(1)]);
//!
//! assert!(store.update(Item::child(1, 3, "Root")).is_err());
//! assert_eq!(store.remove(&ItemId::from("91064cee")).len(), 2);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{
    DomainError, DomainResult, Item, ItemId, SharedTreeStore, TreeItem, TreeStore,
};
