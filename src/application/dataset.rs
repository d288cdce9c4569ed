//! Dataset files: nodes or groups, an optional child mapping and column specs.
//!
//! ```toml
//! nodes = [{ id = "a", name = "Alpha" }, { id = "b", name = "Beta" }]
//!
//! [children]
//! a = [{ id = "a1", name = "Alpha one" }]
//!
//! [[columns]]
//! header = "Name"
//! accessor = "name"
//! kind = "tree"
//! ```
//!
//! A dataset defines either `nodes` (flat) or `groups` (grouped), never both.
//! Without `children` the nodes' embedded `children` lists are used.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::{ApplicationError, ApplicationResult, PathContextExt};
use crate::config::Settings;
use crate::domain::{ChildMapping, DataSource, DomainError, Group, Node};
use crate::render::{Column, FieldCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Toml,
    Json,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(DatasetFormat::Toml),
            "json" => Some(DatasetFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Indented value with expand/collapse marker
    Tree,
    #[default]
    Field,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub header: String,
    pub accessor: String,
    #[serde(default)]
    pub kind: ColumnKind,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub cell_styles: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub header_styles: IndexMap<String, String>,
}

impl ColumnSpec {
    pub fn new(header: impl Into<String>, accessor: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            header: header.into(),
            accessor: accessor.into(),
            kind,
            cell_styles: IndexMap::new(),
            header_styles: IndexMap::new(),
        }
    }

    pub fn to_column(&self, settings: &Settings) -> Column {
        let mut column = match self.kind {
            ColumnKind::Tree => Column::new(&self.header, &self.accessor, settings.tree_cell()),
            ColumnKind::Field => Column::new(&self.header, &self.accessor, FieldCell),
        };
        column.cell_styles = self.cell_styles.clone();
        column.header_styles = self.header_styles.clone();
        column
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawDataset {
    nodes: Option<Vec<Node>>,
    groups: Option<IndexMap<String, Group>>,
    children: Option<IndexMap<String, Value>>,
    columns: Vec<ColumnSpec>,
}

/// Parsed dataset, ready to become a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub source: DataSource,
    pub child_mapping: Option<ChildMapping>,
    pub columns: Vec<ColumnSpec>,
}

impl Dataset {
    /// Parse file content; `origin` only names the input in errors.
    pub fn parse(content: &str, format: DatasetFormat, origin: &Path) -> ApplicationResult<Self> {
        let raw: RawDataset = match format {
            DatasetFormat::Toml => toml::from_str(content).invalid_dataset(origin)?,
            DatasetFormat::Json => serde_json::from_str(content).invalid_dataset(origin)?,
        };
        let dataset = Self::from_raw(raw).map_err(|e| match e {
            DomainError::InvalidNode { .. } => ApplicationError::InvalidDataset {
                path: origin.to_path_buf(),
                message: e.to_string(),
            },
            other => ApplicationError::Domain(other),
        })?;
        debug!(
            grouped = dataset.source.is_grouped(),
            mapping = dataset.child_mapping.is_some(),
            columns = dataset.columns.len(),
            "dataset parsed"
        );
        Ok(dataset)
    }

    fn from_raw(raw: RawDataset) -> Result<Self, DomainError> {
        let source = match (raw.nodes, raw.groups) {
            (Some(_), Some(_)) => return Err(DomainError::AmbiguousDataSource),
            (Some(nodes), None) => DataSource::Flat(nodes),
            (None, Some(groups)) => DataSource::Grouped(groups),
            (None, None) => DataSource::default(),
        };
        let child_mapping = raw.children.map(Self::child_mapping).transpose()?;

        Ok(Self {
            source,
            child_mapping,
            columns: raw.columns,
        })
    }

    /// Entries that are not lists mean "no children" and are dropped.
    fn child_mapping(entries: IndexMap<String, Value>) -> Result<ChildMapping, DomainError> {
        let mut mapping = ChildMapping::new();
        for (id, value) in entries {
            if !value.is_array() {
                warn!(%id, "child mapping entry is not a list, treating as no children");
                continue;
            }
            let children: Vec<Node> =
                serde_json::from_value(value).map_err(|e| DomainError::InvalidNode {
                    context: format!("children of '{}'", id),
                    message: e.to_string(),
                })?;
            mapping.insert(id, children);
        }
        Ok(mapping)
    }

    /// Declared columns, or a single tree column over the node ids.
    pub fn column_specs(&self) -> Vec<ColumnSpec> {
        if self.columns.is_empty() {
            vec![ColumnSpec::new("Id", "id", ColumnKind::Tree)]
        } else {
            self.columns.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn origin() -> PathBuf {
        PathBuf::from("inline.toml")
    }

    #[test]
    fn given_toml_with_mapping_when_parsing_then_uses_mapping_strategy() {
        let content = r#"
nodes = [{ id = "a", name = "Alpha" }, { id = "b" }]

[children]
a = [{ id = "a1" }]
"#;
        let dataset = Dataset::parse(content, DatasetFormat::Toml, &origin()).unwrap();

        let mapping = dataset.child_mapping.expect("mapping");
        assert_eq!(mapping.get("a").map(<[Node]>::len), Some(1));
        assert!(matches!(dataset.source, DataSource::Flat(ref nodes) if nodes.len() == 2));
    }

    #[test]
    fn given_non_list_mapping_entry_when_parsing_then_entry_is_dropped() {
        let content = r#"{ "nodes": [{ "id": "a" }], "children": { "a": "oops", "b": [] } }"#;
        let dataset = Dataset::parse(content, DatasetFormat::Json, &origin()).unwrap();

        let mapping = dataset.child_mapping.unwrap();
        assert_eq!(mapping.get("a"), None);
        assert_eq!(mapping.get("b").map(<[Node]>::len), Some(0));
    }

    #[test]
    fn given_nodes_and_groups_when_parsing_then_ambiguous_error() {
        let content = r#"{ "nodes": [], "groups": {} }"#;
        let err = Dataset::parse(content, DatasetFormat::Json, &origin()).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::AmbiguousDataSource)
        ));
    }

    #[test]
    fn given_no_columns_when_listing_specs_then_defaults_to_id_tree_column() {
        let dataset = Dataset::parse("nodes = []", DatasetFormat::Toml, &origin()).unwrap();
        assert_eq!(
            dataset.column_specs(),
            vec![ColumnSpec::new("Id", "id", ColumnKind::Tree)]
        );
    }

    #[test]
    fn given_unknown_extension_when_detecting_format_then_none() {
        assert_eq!(DatasetFormat::from_path(Path::new("a.yaml")), None);
        assert_eq!(
            DatasetFormat::from_path(Path::new("a.json")),
            Some(DatasetFormat::Json)
        );
    }
}
