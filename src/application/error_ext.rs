//! Path context for I/O failures

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Turns an `io::Result` into an [`ApplicationResult`] naming the action
/// and the file involved, e.g. "operation failed: read tree document: /x.toml".
pub trait IoResultExt<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: source.into(),
        })
    }
}
