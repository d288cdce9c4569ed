//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treetable/treetable.toml`
//! 3. Local config: `<dir>/.treetable.toml` (usually the working directory)
//! 4. Environment variables: `TREETABLE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_MAX_DEPTH;
use crate::render::{PlainGroupTitle, TextOptions, TreeCell};
use crate::util::path::expand_path;

/// Expand/collapse markers used by tree cells and group titles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MarkerConfig {
    pub expanded: String,
    pub collapsed: String,
    pub leaf: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            expanded: "▼".into(),
            collapsed: "▶".into(),
            leaf: " ".into(),
        }
    }
}

/// Raw marker config for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawMarkerConfig {
    pub expanded: Option<String>,
    pub collapsed: Option<String>,
    pub leaf: Option<String>,
}

impl MarkerConfig {
    fn merge(&self, overlay: &RawMarkerConfig) -> Self {
        Self {
            expanded: overlay
                .expanded
                .clone()
                .unwrap_or_else(|| self.expanded.clone()),
            collapsed: overlay
                .collapsed
                .clone()
                .unwrap_or_else(|| self.collapsed.clone()),
            leaf: overlay.leaf.clone().unwrap_or_else(|| self.leaf.clone()),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub class_prefix: Option<String>,
    pub indent: Option<usize>,
    pub max_depth: Option<usize>,
    pub color: Option<bool>,
    pub default_file: Option<PathBuf>,
    pub markers: RawMarkerConfig,
}

/// Unified configuration for treetable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Prefix of the presentational class names (`<prefix>-table`, ...)
    pub class_prefix: String,
    /// Spaces per depth level
    pub indent: usize,
    /// Nesting depth beyond which the flattener stops descending
    pub max_depth: usize,
    /// Colored terminal output
    pub color: bool,
    /// Dataset used when no file argument is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_file: Option<PathBuf>,
    pub markers: MarkerConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            class_prefix: "tree-table".into(),
            indent: 2,
            max_depth: DEFAULT_MAX_DEPTH,
            color: true,
            default_file: None,
            markers: MarkerConfig::default(),
        }
    }
}

/// Get the XDG config directory for treetable.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treetable").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treetable.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".treetable.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            class_prefix: overlay
                .class_prefix
                .clone()
                .unwrap_or_else(|| self.class_prefix.clone()),
            indent: overlay.indent.unwrap_or(self.indent),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            color: overlay.color.unwrap_or(self.color),
            default_file: overlay
                .default_file
                .clone()
                .or_else(|| self.default_file.clone()),
            markers: self.markers.merge(&overlay.markers),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory searched for `.treetable.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply TREETABLE_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`: `TREETABLE_MARKERS__EXPANDED`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREETABLE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("class_prefix") {
            settings.class_prefix = val;
        }
        if let Ok(val) = config.get_int("indent") {
            settings.indent = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("TREETABLE_INDENT must not be negative: {}", val),
            })?;
        }
        if let Ok(val) = config.get_int("max_depth") {
            settings.max_depth = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("TREETABLE_MAX_DEPTH must not be negative: {}", val),
            })?;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }
        if let Ok(val) = config.get_string("default_file") {
            settings.default_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("markers.expanded") {
            settings.markers.expanded = val;
        }
        if let Ok(val) = config.get_string("markers.collapsed") {
            settings.markers.collapsed = val;
        }
        if let Ok(val) = config.get_string("markers.leaf") {
            settings.markers.leaf = val;
        }

        Ok(settings)
    }

    /// Expand `~` and `$VAR` in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(file) = &self.default_file {
            self.default_file = Some(expand_path(&file.to_string_lossy()));
        }
    }

    /// Serialize as TOML for display.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }

    /// Commented template written by `config init`.
    pub fn template() -> String {
        r#"# treetable configuration
#
# class_prefix = "tree-table"
# indent = 2
# max_depth = 256
# color = true
# default_file = "~/data/tree.toml"
#
# [markers]
# expanded = "▼"
# collapsed = "▶"
# leaf = " "
"#
        .to_string()
    }

    pub fn tree_cell(&self) -> TreeCell {
        TreeCell {
            indent: self.indent,
            expanded_marker: self.markers.expanded.clone(),
            collapsed_marker: self.markers.collapsed.clone(),
            leaf_marker: self.markers.leaf.clone(),
        }
    }

    pub fn group_title(&self) -> PlainGroupTitle {
        PlainGroupTitle {
            expanded_marker: self.markers.expanded.clone(),
            collapsed_marker: self.markers.collapsed.clone(),
        }
    }

    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            indent: self.indent,
            color: self.color,
        }
    }
}
