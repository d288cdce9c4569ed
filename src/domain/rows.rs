//! Row descriptors produced by the flattener

use serde::Serialize;

use crate::domain::entities::Node;

/// A node's data row with the structural metadata presentation needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow<'a> {
    pub node: &'a Node,
    /// Number of ancestors between this node and its tree root
    pub depth: usize,
    /// Node closes the "last sibling at every level" branch of its root
    pub is_leaf: bool,
    pub has_children: bool,
    pub is_expanded: bool,
    pub total_children: usize,
    /// Id of the top-most ancestor (own id for roots)
    pub root_id: &'a str,
    /// Id of the nearest ancestor, `None` for roots
    pub parent_id: Option<&'a str>,
    /// Leaf-chain flag handed down by the parent
    pub parent_is_leaf_chain: bool,
    pub is_last_sibling: bool,
    /// Key of the enclosing group when the source is grouped
    pub group_key: Option<&'a str>,
}

impl<'a> VisibleRow<'a> {
    pub fn id(&self) -> &'a str {
        &self.node.id
    }

    pub fn attributes(&self) -> RowAttributes {
        RowAttributes {
            row_id: self.node.id.clone(),
            depth: self.depth,
            is_leaf: self.is_leaf,
            has_children: self.has_children,
            is_expanded: self.is_expanded,
            root_id: self.root_id.to_string(),
        }
    }
}

/// Title emitted beneath an expanded node, before its children.
///
/// Carries the owning node's row so styling can reuse its attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleRow<'a> {
    pub row: VisibleRow<'a>,
    pub title: &'a str,
}

/// Header row opening one group of a grouped source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHeaderRow<'a> {
    pub group_key: &'a str,
    pub label: &'a str,
    pub is_expanded: bool,
    /// Number of root nodes in the group
    pub count: usize,
    /// Position of the group in the source
    pub index: usize,
    pub title: Option<&'a str>,
}

/// One entry of the flattened output, in document order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Row<'a> {
    Data(VisibleRow<'a>),
    Title(TitleRow<'a>),
    GroupHeader(GroupHeaderRow<'a>),
}

impl<'a> Row<'a> {
    pub fn as_data(&self) -> Option<&VisibleRow<'a>> {
        match self {
            Row::Data(row) => Some(row),
            _ => None,
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Row::Data(_))
    }
}

/// Structural attributes attached to every emitted row and cell.
///
/// Names and values are a stable contract for styling and automation hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAttributes {
    pub row_id: String,
    pub depth: usize,
    pub is_leaf: bool,
    pub has_children: bool,
    pub is_expanded: bool,
    pub root_id: String,
}

impl RowAttributes {
    /// `data-*` attribute pairs in their canonical order.
    pub fn data_attributes(&self) -> [(&'static str, String); 6] {
        [
            ("data-rowid", self.row_id.clone()),
            ("data-depth", self.depth.to_string()),
            ("data-isleaf", self.is_leaf.to_string()),
            ("data-haschildren", self.has_children.to_string()),
            ("data-isexpanded", self.is_expanded.to_string()),
            ("data-rootid", self.root_id.clone()),
        ]
    }
}
