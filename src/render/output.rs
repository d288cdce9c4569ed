//! Rendered row structure handed to the presentation host

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::RowAttributes;

/// Class carried by title rows and their single spanning cell.
pub const STATIC_COLUMNS_CLASS: &str = "static-columns";
/// Class carried by group header rows.
pub const GROUP_TITLE_CLASS: &str = "group-title-columns";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedHeader {
    pub content: String,
    pub styles: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCell {
    pub attributes: RowAttributes,
    pub styles: IndexMap<String, String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedRow {
    Data {
        attributes: RowAttributes,
        cells: Vec<RenderedCell>,
    },
    /// Spans every column
    Title {
        attributes: RowAttributes,
        colspan: usize,
        content: String,
    },
    /// Spans every column
    GroupHeader {
        group_key: String,
        colspan: usize,
        content: String,
    },
}

impl RenderedRow {
    pub fn attributes(&self) -> Option<&RowAttributes> {
        match self {
            RenderedRow::Data { attributes, .. } | RenderedRow::Title { attributes, .. } => {
                Some(attributes)
            }
            RenderedRow::GroupHeader { .. } => None,
        }
    }

    /// Presentational class of the row, if any.
    pub fn class(&self) -> Option<&'static str> {
        match self {
            RenderedRow::Data { .. } => None,
            RenderedRow::Title { .. } => Some(STATIC_COLUMNS_CLASS),
            RenderedRow::GroupHeader { .. } => Some(GROUP_TITLE_CLASS),
        }
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTable {
    pub class_prefix: String,
    pub headers: Vec<RenderedHeader>,
    pub rows: Vec<RenderedRow>,
    /// Marker control output, rendered but not laid out in the table
    pub marker: Option<String>,
}

impl RenderedTable {
    pub fn table_class(&self) -> String {
        format!("{}-table", self.class_prefix)
    }

    pub fn head_class(&self) -> String {
        format!("{}-head", self.class_prefix)
    }

    pub fn body_class(&self) -> String {
        format!("{}-body", self.class_prefix)
    }

    /// Class of the box wrapping title content.
    pub fn title_class(&self) -> String {
        format!("{}-title", self.class_prefix)
    }

    pub fn data_rows(&self) -> impl Iterator<Item = &RenderedRow> {
        self.rows
            .iter()
            .filter(|row| matches!(row, RenderedRow::Data { .. }))
    }
}
