//! Columns and per-column cell renderers

use std::fmt;

use indexmap::IndexMap;

use crate::domain::Node;
use crate::render::requests::ExpandHandle;

/// Everything a cell renderer gets for one (row, column) pair.
pub struct CellContext<'a> {
    pub data: &'a Node,
    pub row_id: &'a str,
    pub depth: usize,
    pub is_leaf: bool,
    pub has_children: bool,
    pub is_expanded: bool,
    pub total_children: usize,
    pub accessor: &'a str,
    pub(crate) expand: ExpandHandle<'a>,
}

impl<'a> CellContext<'a> {
    /// Request an expansion change; applied after the render pass.
    pub fn on_expand(&self, id: &str, value: bool) {
        self.expand.toggle(id, value);
    }
}

/// Renders the content of one cell.
pub trait CellRenderer {
    fn render(&self, ctx: &CellContext<'_>) -> String;
}

impl<F> CellRenderer for F
where
    F: Fn(&CellContext<'_>) -> String,
{
    fn render(&self, ctx: &CellContext<'_>) -> String {
        self(ctx)
    }
}

/// Shows the node's payload field named by the accessor.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldCell;

impl CellRenderer for FieldCell {
    fn render(&self, ctx: &CellContext<'_>) -> String {
        ctx.data.field_text(ctx.accessor).unwrap_or_default()
    }
}

/// Indented field value preceded by an expand/collapse marker.
#[derive(Debug, Clone)]
pub struct TreeCell {
    pub indent: usize,
    pub expanded_marker: String,
    pub collapsed_marker: String,
    pub leaf_marker: String,
}

impl Default for TreeCell {
    fn default() -> Self {
        Self {
            indent: 2,
            expanded_marker: "▼".into(),
            collapsed_marker: "▶".into(),
            leaf_marker: " ".into(),
        }
    }
}

impl CellRenderer for TreeCell {
    fn render(&self, ctx: &CellContext<'_>) -> String {
        let marker = match (ctx.has_children, ctx.is_expanded) {
            (false, _) => &self.leaf_marker,
            (true, true) => &self.expanded_marker,
            (true, false) => &self.collapsed_marker,
        };
        let value = ctx
            .data
            .field_text(ctx.accessor)
            .unwrap_or_else(|| ctx.row_id.to_string());
        format!("{}{} {}", " ".repeat(ctx.depth * self.indent), marker, value)
    }
}

/// One output column.
pub struct Column {
    pub header: String,
    /// Opaque key handed to the cell renderer
    pub accessor: String,
    pub cell: Box<dyn CellRenderer>,
    pub cell_styles: IndexMap<String, String>,
    pub header_styles: IndexMap<String, String>,
}

impl Column {
    pub fn new(
        header: impl Into<String>,
        accessor: impl Into<String>,
        cell: impl CellRenderer + 'static,
    ) -> Self {
        Self {
            header: header.into(),
            accessor: accessor.into(),
            cell: Box::new(cell),
            cell_styles: IndexMap::new(),
            header_styles: IndexMap::new(),
        }
    }

    pub fn field(header: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self::new(header, accessor, FieldCell)
    }

    pub fn tree(header: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self::new(header, accessor, TreeCell::default())
    }

    pub fn with_cell_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cell_styles.insert(name.into(), value.into());
        self
    }

    pub fn with_header_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header_styles.insert(name.into(), value.into());
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("cell_styles", &self.cell_styles)
            .field("header_styles", &self.header_styles)
            .finish_non_exhaustive()
    }
}
