//! Dataset loading service
//!
//! Reads dataset files through the filesystem boundary and parses them.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{
    ApplicationError, ApplicationResult, Dataset, DatasetFormat, PathContextExt,
};
use crate::infrastructure::traits::FileSystem;

/// Service for loading datasets from TOML or JSON files.
pub struct DatasetService {
    fs: Arc<dyn FileSystem>,
}

impl DatasetService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and parse a dataset; the format follows the file extension.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Dataset> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::DatasetNotFound(path.to_path_buf()));
        }
        let format = DatasetFormat::from_path(path)
            .ok_or_else(|| ApplicationError::UnsupportedFormat(path.to_path_buf()))?;
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read dataset", path)?;
        debug!(?format, bytes = content.len(), "dataset read");

        Dataset::parse(&content, format, path)
    }
}
