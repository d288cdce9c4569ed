//! Tree table entry point: data + columns + expansion store -> rendered rows

use tracing::{debug, instrument};

use crate::domain::{
    ChildMapping, ChildSource, DataSource, Embedded, ExpansionState, ExpansionStore, Flattener,
    Row, DEFAULT_MAX_DEPTH,
};
use crate::render::collaborators::{
    GroupTitleContext, GroupTitleRenderer, MarkerContext, MarkerRenderer, PlainGroupTitle,
    PlainTitle, TitleContext, TitleRenderer,
};
use crate::render::column::{CellContext, Column};
use crate::render::output::{RenderedCell, RenderedHeader, RenderedRow, RenderedTable};
use crate::render::requests::{ExpandRequest, UpdateQueue};

/// Result of one render pass: the table plus the requests its renderers raised.
#[derive(Debug)]
pub struct RenderPass {
    pub table: RenderedTable,
    pub requests: Vec<ExpandRequest>,
}

/// Hierarchical table with per-node expand/collapse state.
///
/// Children come from the child mapping when one is set, otherwise from the
/// nodes' embedded child lists. The table owns its expansion store; every
/// call to [`TreeTable::rows`] or [`TreeTable::render`] flattens afresh.
///
/// # Example
///
/// ```
/// use treetable::domain::{ChildMapping, Node};
/// use treetable::render::{Column, TreeTable};
///
/// let mut table = TreeTable::new(
///     "files",
///     vec![Node::new("a").with_field("name", "src"), Node::new("b")],
///     vec![Column::tree("Name", "name")],
/// )
/// .with_child_mapping(ChildMapping::new().with("a", vec![Node::new("a1")]));
///
/// assert_eq!(table.rows().len(), 2);
/// table.toggle("a", true);
/// assert_eq!(table.rows().len(), 3);
/// ```
pub struct TreeTable {
    class_prefix: String,
    data: DataSource,
    columns: Vec<Column>,
    child_mapping: Option<ChildMapping>,
    marker: Option<Box<dyn MarkerRenderer>>,
    title_renderer: Box<dyn TitleRenderer>,
    group_title_renderer: Box<dyn GroupTitleRenderer>,
    store: ExpansionStore,
    max_depth: usize,
}

impl TreeTable {
    pub fn new(
        class_prefix: impl Into<String>,
        data: impl Into<DataSource>,
        columns: Vec<Column>,
    ) -> Self {
        Self {
            class_prefix: class_prefix.into(),
            data: data.into(),
            columns,
            child_mapping: None,
            marker: None,
            title_renderer: Box::new(PlainTitle),
            group_title_renderer: Box::new(PlainGroupTitle::default()),
            store: ExpansionStore::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_child_mapping(mut self, mapping: ChildMapping) -> Self {
        self.child_mapping = Some(mapping);
        self
    }

    pub fn with_marker(mut self, marker: impl MarkerRenderer + 'static) -> Self {
        self.marker = Some(Box::new(marker));
        self
    }

    pub fn with_title_renderer(mut self, renderer: impl TitleRenderer + 'static) -> Self {
        self.title_renderer = Box::new(renderer);
        self
    }

    pub fn with_group_title_renderer(
        mut self,
        renderer: impl GroupTitleRenderer + 'static,
    ) -> Self {
        self.group_title_renderer = Box::new(renderer);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Start from an existing expansion state instead of all-collapsed.
    pub fn with_expansion(mut self, state: ExpansionState) -> Self {
        self.store = ExpansionStore::with_state(state);
        self
    }

    pub fn class_prefix(&self) -> &str {
        &self.class_prefix
    }

    pub fn data(&self) -> &DataSource {
        &self.data
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn child_mapping(&self) -> Option<&ChildMapping> {
        self.child_mapping.as_ref()
    }

    pub fn expansion(&self) -> &ExpansionState {
        self.store.state()
    }

    /// Incremented by every expansion update.
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    fn child_source(&self) -> &dyn ChildSource {
        match &self.child_mapping {
            Some(mapping) => mapping,
            None => &Embedded,
        }
    }

    fn flattener(&self) -> Flattener<'_, dyn ChildSource + '_> {
        Flattener::new(self.child_source(), self.store.state()).with_max_depth(self.max_depth)
    }

    /// Visible rows for the current expansion state.
    pub fn rows(&self) -> Vec<Row<'_>> {
        self.flattener().flatten(&self.data).collect()
    }

    pub fn toggle(&mut self, id: &str, value: bool) {
        self.store.toggle(id, value);
    }

    /// Ids affected by expand-all/collapse-all.
    pub fn expandable_ids(&self) -> Vec<String> {
        self.child_source()
            .expandable_ids(&self.data)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    pub fn expand_all(&mut self) {
        let ids = self.expandable_ids();
        self.store.expand_all(ids.iter().map(String::as_str));
    }

    pub fn collapse_all(&mut self) {
        let ids = self.expandable_ids();
        self.store.collapse_all(ids.iter().map(String::as_str));
    }

    /// Apply queued requests in order.
    #[instrument(level = "debug", skip_all)]
    pub fn apply<I>(&mut self, requests: I)
    where
        I: IntoIterator<Item = ExpandRequest>,
    {
        for request in requests {
            debug!(?request, "applying");
            match request {
                ExpandRequest::Toggle { id, value } => self.toggle(&id, value),
                ExpandRequest::ExpandAll => self.expand_all(),
                ExpandRequest::CollapseAll => self.collapse_all(),
            }
        }
    }

    /// Render headers, rows and marker for the current state.
    #[instrument(level = "debug", skip(self), fields(prefix = %self.class_prefix))]
    pub fn render(&self) -> RenderPass {
        let queue = UpdateQueue::new();
        let table = self.render_with(&queue);
        RenderPass {
            table,
            requests: queue.drain(),
        }
    }

    /// Render, routing renderer callbacks into `queue`.
    pub fn render_with(&self, queue: &UpdateQueue) -> RenderedTable {
        let headers = self
            .columns
            .iter()
            .map(|column| RenderedHeader {
                content: column.header.clone(),
                styles: column.header_styles.clone(),
            })
            .collect();

        let colspan = self.columns.len();
        let rows: Vec<RenderedRow> = self
            .flattener()
            .flatten(&self.data)
            .map(|row| self.render_row(row, colspan, queue))
            .collect();
        debug!(rows = rows.len(), "rendered");

        let marker = self
            .marker
            .as_ref()
            .map(|marker| marker.render(&MarkerContext::new(queue.handle())));

        RenderedTable {
            class_prefix: self.class_prefix.clone(),
            headers,
            rows,
            marker,
        }
    }

    fn render_row(&self, row: Row<'_>, colspan: usize, queue: &UpdateQueue) -> RenderedRow {
        match row {
            Row::Data(row) => {
                let attributes = row.attributes();
                let cells = self
                    .columns
                    .iter()
                    .map(|column| {
                        let ctx = CellContext {
                            data: row.node,
                            row_id: row.id(),
                            depth: row.depth,
                            is_leaf: row.is_leaf,
                            has_children: row.has_children,
                            is_expanded: row.is_expanded,
                            total_children: row.total_children,
                            accessor: &column.accessor,
                            expand: queue.handle(),
                        };
                        RenderedCell {
                            attributes: attributes.clone(),
                            styles: column.cell_styles.clone(),
                            content: column.cell.render(&ctx),
                        }
                    })
                    .collect();
                RenderedRow::Data { attributes, cells }
            }
            Row::Title(title) => RenderedRow::Title {
                attributes: title.row.attributes(),
                colspan,
                content: self.title_renderer.render(&TitleContext {
                    data: title.row.node,
                    depth: title.row.depth,
                    title: title.title,
                }),
            },
            Row::GroupHeader(group) => RenderedRow::GroupHeader {
                group_key: group.group_key.to_string(),
                colspan,
                content: self.group_title_renderer.render(&GroupTitleContext {
                    group_key: group.group_key,
                    label: group.label,
                    is_expanded: group.is_expanded,
                    count: group.count,
                    index: group.index,
                    title: group.title,
                }),
            },
        }
    }
}
