//! Application layer: loading documents and deriving read-only views
//!
//! This layer orchestrates domain logic and owns all file I/O.

pub mod document;
pub mod error;
pub mod error_ext;
pub mod rows;

pub use document::TreeDocument;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use rows::{build_rows, GridRow, RowCategory};
