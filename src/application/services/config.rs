//! Config file service: writes the settings template

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::instrument;

use crate::application::{ApplicationError, ApplicationResult, PathContextExt};
use crate::config::Settings;
use crate::infrastructure::traits::FileSystem;

pub struct ConfigService {
    fs: Arc<dyn FileSystem>,
}

impl ConfigService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Write the commented settings template to `path`.
    ///
    /// Refuses to overwrite an existing file.
    #[instrument(level = "debug", skip(self))]
    pub fn init(&self, path: &Path) -> ApplicationResult<PathBuf> {
        if self.fs.exists(path) {
            return Err(ApplicationError::Config {
                message: format!("config file already exists: {}", path.display()),
            });
        }
        if let Some(parent) = path.parent() {
            self.fs
                .create_dir_all(parent)
                .with_path_context("create config directory", parent)?;
        }
        self.fs
            .write(path, &Settings::template())
            .with_path_context("write config", path)?;
        Ok(path.to_path_buf())
    }
}
