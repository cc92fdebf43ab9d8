//! Domain layer: the hierarchical store and its building blocks
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod cache;
pub mod children;
pub mod entities;
pub mod error;
pub mod id;
pub mod shared;
pub mod store;

pub use arena::ItemArena;
pub use cache::DescendantCache;
pub use children::ChildIndex;
pub use entities::{Item, TreeItem};
pub use error::{DomainError, DomainResult};
pub use id::ItemId;
pub use shared::SharedTreeStore;
pub use store::TreeStore;
