//! Tree flattener: data source + expansion state -> ordered visible rows.
//!
//! Rows come out in document order: a node, its title (when expanded and
//! titled), the flattened rows of its children (when expanded), then the
//! next sibling. Traversal uses an explicit stack of sibling frames, so
//! rows are produced lazily and deep trees do not grow the call stack.

use std::iter;

use itertools::Either;
use tracing::{trace, warn};

use crate::domain::entities::{ChildMapping, DataSource, Node};
use crate::domain::expansion::ExpansionState;
use crate::domain::rows::{GroupHeaderRow, Row, TitleRow, VisibleRow};

/// Default cap on nesting depth before descent is refused.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Where a node's children are found.
pub trait ChildSource {
    /// Child list of `node`, `None` when it has none.
    fn children<'a>(&'a self, node: &'a Node) -> Option<&'a [Node]>;

    /// Ids that expand-all/collapse-all act on.
    fn expandable_ids<'a>(&'a self, data: &'a DataSource) -> Vec<&'a str>;
}

/// Children embedded on each node.
#[derive(Debug, Clone, Copy, Default)]
pub struct Embedded;

impl ChildSource for Embedded {
    fn children<'a>(&'a self, node: &'a Node) -> Option<&'a [Node]> {
        node.children.as_deref()
    }

    /// Every node carrying a non-empty embedded child list.
    fn expandable_ids<'a>(&'a self, data: &'a DataSource) -> Vec<&'a str> {
        let mut ids = Vec::new();
        let mut stack: Vec<&Node> = data.roots().collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            if let Some(children) = node.children.as_deref().filter(|c| !c.is_empty()) {
                ids.push(node.id.as_str());
                // Push in reverse order for left-to-right traversal
                for child in children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        ids
    }
}

impl ChildSource for ChildMapping {
    fn children<'a>(&'a self, node: &'a Node) -> Option<&'a [Node]> {
        self.get(&node.id)
    }

    /// Every key of the mapping, empty lists included.
    fn expandable_ids<'a>(&'a self, _data: &'a DataSource) -> Vec<&'a str> {
        self.keys().collect()
    }
}

/// Pure function of (roots, child source, expansion state).
pub struct Flattener<'a, S: ChildSource + ?Sized> {
    source: &'a S,
    expansion: &'a ExpansionState,
    max_depth: usize,
}

impl<'a, S: ChildSource + ?Sized> Clone for Flattener<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S: ChildSource + ?Sized> Copy for Flattener<'a, S> {}

impl<'a, S: ChildSource + ?Sized> Flattener<'a, S> {
    pub fn new(source: &'a S, expansion: &'a ExpansionState) -> Self {
        Self {
            source,
            expansion,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Rows of one forest, starting at depth 0 with a fresh leaf chain.
    pub fn rows(&self, roots: &'a [Node]) -> VisibleRows<'a, S> {
        VisibleRows::new(*self, roots, None)
    }

    /// Rows of a whole data source, group headers included.
    pub fn flatten(&self, data: &'a DataSource) -> impl Iterator<Item = Row<'a>> + 'a
    where
        S: 'a,
    {
        let this = *self;
        match data {
            DataSource::Flat(nodes) => Either::Left(this.rows(nodes)),
            DataSource::Grouped(groups) => Either::Right(groups.iter().enumerate().flat_map(
                move |(index, (key, group))| {
                    let header = Row::GroupHeader(GroupHeaderRow {
                        group_key: key.as_str(),
                        label: group.label.as_str(),
                        is_expanded: group.is_expanded,
                        count: group.nodes.len(),
                        index,
                        title: group.title.as_deref(),
                    });
                    let body = group
                        .is_expanded
                        .then(|| VisibleRows::new(this, &group.nodes, Some(key.as_str())));
                    iter::once(header).chain(body.into_iter().flatten())
                },
            )),
        }
    }
}

struct Frame<'a> {
    siblings: &'a [Node],
    next: usize,
    depth: usize,
    root_id: Option<&'a str>,
    parent_id: Option<&'a str>,
    leaf_chain: bool,
}

/// Lazy iterator over the rows of one forest.
pub struct VisibleRows<'a, S: ChildSource + ?Sized> {
    flattener: Flattener<'a, S>,
    group_key: Option<&'a str>,
    stack: Vec<Frame<'a>>,
    pending_title: Option<TitleRow<'a>>,
}

impl<'a, S: ChildSource + ?Sized> VisibleRows<'a, S> {
    fn new(flattener: Flattener<'a, S>, roots: &'a [Node], group_key: Option<&'a str>) -> Self {
        Self {
            flattener,
            group_key,
            stack: vec![Frame {
                siblings: roots,
                next: 0,
                depth: 0,
                root_id: None,
                parent_id: None,
                leaf_chain: true,
            }],
            pending_title: None,
        }
    }

    /// Whether the children of `node` at `depth` may be pushed.
    fn may_descend(&self, node: &Node, depth: usize) -> bool {
        if depth + 1 > self.flattener.max_depth {
            warn!(id = %node.id, depth, "maximum depth reached, not descending");
            return false;
        }
        let on_path = self
            .stack
            .iter()
            .any(|frame| frame.parent_id == Some(node.id.as_str()));
        if on_path {
            warn!(id = %node.id, "node is its own ancestor, not descending");
            return false;
        }
        true
    }
}

impl<'a, S: ChildSource + ?Sized> Iterator for VisibleRows<'a, S> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(title) = self.pending_title.take() {
            return Some(Row::Title(title));
        }

        loop {
            let frame = self.stack.last_mut()?;
            if frame.next >= frame.siblings.len() {
                self.stack.pop();
                continue;
            }
            let index = frame.next;
            frame.next += 1;

            let siblings = frame.siblings;
            let depth = frame.depth;
            let parent_id = frame.parent_id;
            let parent_chain = frame.leaf_chain;
            let node = &siblings[index];
            let root_id = frame.root_id.unwrap_or(node.id.as_str());

            let resolved = self.flattener.source.children(node);
            let total_children = resolved.map_or(0, <[Node]>::len);
            let children = resolved.filter(|c| !c.is_empty());
            let has_children = children.is_some();
            let is_expanded = self.flattener.expansion.is_expanded(&node.id);
            let is_last_sibling = index + 1 == siblings.len();

            let row = VisibleRow {
                node,
                depth,
                is_leaf: parent_chain && is_last_sibling && (!is_expanded || !has_children),
                has_children,
                is_expanded,
                total_children,
                root_id,
                parent_id,
                parent_is_leaf_chain: parent_chain,
                is_last_sibling,
                group_key: self.group_key,
            };
            trace!(id = %node.id, depth, is_leaf = row.is_leaf, "row");

            if is_expanded {
                if let Some(title) = node.title.as_deref() {
                    self.pending_title = Some(TitleRow { row, title });
                }
                if let Some(children) = children {
                    if self.may_descend(node, depth) {
                        // Roots always start a fresh leaf chain for their children
                        let leaf_chain = depth == 0 || (parent_chain && is_last_sibling);
                        self.stack.push(Frame {
                            siblings: children,
                            next: 0,
                            depth: depth + 1,
                            root_id: Some(root_id),
                            parent_id: Some(node.id.as_str()),
                            leaf_chain,
                        });
                    }
                }
            }

            return Some(Row::Data(row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(rows: impl Iterator<Item = Row<'a>>) -> Vec<String> {
        rows.map(|row| match row {
            Row::Data(r) => r.id().to_string(),
            Row::Title(t) => format!("title:{}", t.row.id()),
            Row::GroupHeader(g) => format!("group:{}", g.group_key),
        })
        .collect()
    }

    #[test]
    fn given_embedded_children_when_flattening_then_expanded_subtrees_follow_parent() {
        let roots = vec![
            Node::new("a").with_children(vec![Node::new("a1"), Node::new("a2")]),
            Node::new("b"),
        ];
        let state = ExpansionState::new().toggled("a", true);

        let rows = Flattener::new(&Embedded, &state).rows(&roots);
        assert_eq!(ids(rows), vec!["a", "a1", "a2", "b"]);
    }

    #[test]
    fn given_title_when_node_expanded_then_title_precedes_children() {
        let roots = vec![Node::new("a").with_title("A details")];
        let mapping = ChildMapping::new().with("a", vec![Node::new("a1")]);
        let state = ExpansionState::new().toggled("a", true);

        let rows = Flattener::new(&mapping, &state).rows(&roots);
        assert_eq!(ids(rows), vec!["a", "title:a", "a1"]);
    }

    #[test]
    fn given_cyclic_mapping_when_flattening_then_descent_stops_at_repeated_ancestor() {
        let roots = vec![Node::new("a")];
        let mapping = ChildMapping::new()
            .with("a", vec![Node::new("b")])
            .with("b", vec![Node::new("a")]);
        let state = ExpansionState::new().toggled("a", true).toggled("b", true);

        let rows = Flattener::new(&mapping, &state).rows(&roots);
        assert_eq!(ids(rows), vec!["a", "b", "a"]);
    }

    #[test]
    fn given_depth_cap_when_flattening_then_deeper_levels_are_not_emitted() {
        let roots = vec![Node::new("a")];
        let mapping = ChildMapping::new()
            .with("a", vec![Node::new("b")])
            .with("b", vec![Node::new("c")]);
        let state = ExpansionState::new().toggled("a", true).toggled("b", true);

        let rows = Flattener::new(&mapping, &state).with_max_depth(1).rows(&roots);
        assert_eq!(ids(rows), vec!["a", "b"]);
    }

    #[test]
    fn given_embedded_tree_when_listing_expandable_then_returns_preorder_parents() {
        let data = DataSource::Flat(vec![
            Node::new("a").with_children(vec![
                Node::new("a1").with_children(vec![Node::new("a11")]),
                Node::new("a2").with_children(vec![]),
            ]),
            Node::new("b").with_children(vec![Node::new("b1")]),
        ]);

        assert_eq!(Embedded.expandable_ids(&data), vec!["a", "a1", "b"]);
    }
}
