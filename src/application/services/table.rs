//! Table service: dataset + settings -> tree table, rendered text or outline

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, Dataset};
use crate::config::Settings;
use crate::render::{format_attributes, format_table, to_outline, ExpandRequest, TreeTable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Column-aligned plain text
    #[default]
    Text,
    /// Class names and `data-*` attributes per row
    Attrs,
    /// The rendered table as JSON
    Json,
}

/// Which nodes start out expanded.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub expand: Vec<String>,
    pub expand_all: bool,
}

impl ViewOptions {
    fn requests(&self) -> Vec<ExpandRequest> {
        let mut requests = Vec::with_capacity(self.expand.len() + 1);
        if self.expand_all {
            requests.push(ExpandRequest::ExpandAll);
        }
        requests.extend(self.expand.iter().map(|id| ExpandRequest::Toggle {
            id: id.clone(),
            value: true,
        }));
        requests
    }
}

pub struct TableService {
    settings: Arc<Settings>,
}

impl TableService {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Build a table over a copy of the dataset with the given expansion.
    #[instrument(level = "debug", skip(self, dataset))]
    pub fn build(&self, dataset: &Dataset, view: &ViewOptions) -> TreeTable {
        let columns = dataset
            .column_specs()
            .iter()
            .map(|spec| spec.to_column(&self.settings))
            .collect();
        let mut table = TreeTable::new(
            self.settings.class_prefix.clone(),
            dataset.source.clone(),
            columns,
        )
        .with_group_title_renderer(self.settings.group_title())
        .with_max_depth(self.settings.max_depth);
        if let Some(mapping) = &dataset.child_mapping {
            table = table.with_child_mapping(mapping.clone());
        }

        table.apply(view.requests());
        debug!(
            expanded = table.expansion().expanded_ids().len(),
            "table built"
        );
        table
    }

    /// Render the table in the requested format.
    pub fn render(
        &self,
        dataset: &Dataset,
        view: &ViewOptions,
        format: OutputFormat,
    ) -> ApplicationResult<String> {
        let table = self.build(dataset, view);
        let pass = table.render();
        info!(rows = pass.table.rows.len(), ?format, "rendered table");

        match format {
            OutputFormat::Text => Ok(format_table(&pass.table, self.settings.text_options())),
            OutputFormat::Attrs => Ok(format_attributes(&pass.table)),
            OutputFormat::Json => serde_json::to_string_pretty(&pass.table)
                .map(|json| json + "\n")
                .map_err(|e| ApplicationError::OperationFailed {
                    context: "serialize rendered table".into(),
                    source: Box::new(e),
                }),
        }
    }

    /// Outline of the visible rows, labeled by the first tree column.
    pub fn outline(&self, dataset: &Dataset, view: &ViewOptions, root: &str) -> String {
        let table = self.build(dataset, view);
        let specs = dataset.column_specs();
        let accessor = specs.first().map(|spec| spec.accessor.as_str());
        to_outline(root, &table.rows(), accessor).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::DatasetFormat;
    use std::path::Path;

    fn dataset() -> Dataset {
        let content = r#"
nodes = [{ id = "a", name = "Alpha" }, { id = "b", name = "Beta" }]

[children]
a = [{ id = "a1", name = "Alpha one" }]

[[columns]]
header = "Name"
accessor = "name"
kind = "tree"
"#;
        Dataset::parse(content, DatasetFormat::Toml, Path::new("t.toml")).unwrap()
    }

    fn service() -> TableService {
        TableService::new(Arc::new(Settings {
            color: false,
            ..Settings::default()
        }))
    }

    #[test]
    fn given_expand_option_when_building_then_node_is_expanded() {
        let view = ViewOptions {
            expand: vec!["a".into()],
            expand_all: false,
        };
        let table = service().build(&dataset(), &view);
        let ids: Vec<_> = table
            .rows()
            .iter()
            .filter_map(|row| row.as_data().map(|data| data.id()))
            .collect();
        assert_eq!(ids, vec!["a", "a1", "b"]);
    }

    #[test]
    fn given_collapsed_dataset_when_rendering_text_then_shows_roots_only() {
        let text = service()
            .render(&dataset(), &ViewOptions::default(), OutputFormat::Text)
            .unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Name");
        assert_eq!(lines[2], "▶ Alpha");
        assert_eq!(lines[3], "  Beta");
    }

    #[test]
    fn given_json_format_when_rendering_then_rows_are_tagged() {
        let view = ViewOptions {
            expand: vec![],
            expand_all: true,
        };
        let json = service()
            .render(&dataset(), &view, OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["class_prefix"], "tree-table");
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["rows"][1]["kind"], "data");
        assert_eq!(value["rows"][1]["attributes"]["depth"], 1);
    }
}
