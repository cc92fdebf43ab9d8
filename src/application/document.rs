//! TOML tree documents
//!
//! A document is a flat list of `[[items]]` tables:
//!
//! ```toml
//! [[items]]
//! id = 1
//! label = "Root"
//!
//! [[items]]
//! id = "91064cee"
//! parent = 1
//! label = "Child"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Item, TreeStore};

/// Serialized form of a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDocument {
    #[serde(default)]
    pub items: Vec<Item>,
}

impl TreeDocument {
    /// Parse document content; `origin` is only used for error messages.
    pub fn parse(content: &str, origin: &Path) -> ApplicationResult<Self> {
        toml::from_str(content).map_err(|e| ApplicationError::Document {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> ApplicationResult<Self> {
        let content = std::fs::read_to_string(path).with_path_context("read tree document", path)?;
        let document = Self::parse(&content, path)?;
        debug!("loaded {} items from {}", document.items.len(), path.display());
        Ok(document)
    }

    /// Snapshot of the live items of `store`, in store order.
    pub fn from_store(store: &TreeStore<Item>) -> Self {
        Self {
            items: store.iter().cloned().collect(),
        }
    }

    pub fn to_toml_string(&self) -> ApplicationResult<String> {
        toml::to_string(self).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize tree document".into(),
            source: Box::new(e),
        })
    }

    pub fn into_store(self) -> TreeStore<Item> {
        TreeStore::new(self.items)
    }
}
