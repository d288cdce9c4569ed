//! Error conversion helpers for file and parse results
//!
//! Attach the offending path to low-level errors so messages name the input.

use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait adding path context to any error result.
pub trait PathContextExt<T> {
    /// Wrap the error as `OperationFailed` naming `action` and `path`.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read dataset", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Wrap the error as `InvalidDataset` for `path`.
    fn invalid_dataset(self, path: &Path) -> ApplicationResult<T>;
}

impl<T, E> PathContextExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn invalid_dataset(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::InvalidDataset {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
