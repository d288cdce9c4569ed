//! Domain entities: nodes, child mappings, groups and the data source union

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of the hierarchical dataset.
///
/// `id` must be unique across the whole forest: it keys the expansion state
/// and the rendered row. Everything besides `id`, `title` and `children` is
/// opaque payload for cell renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Title shown beneath the node while it is expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Embedded children (only read by the `Embedded` child source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            children: None,
            fields: IndexMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Display text of a payload field; strings are shown without quotes.
    /// `id` resolves to the node id.
    pub fn field_text(&self, name: &str) -> Option<String> {
        if name == "id" {
            return Some(self.id.clone());
        }
        self.field(name).map(|value| match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

/// External id -> children lookup table.
///
/// A missing key and an empty list both mean "no children".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildMapping(IndexMap<String, Vec<Node>>);

impl ChildMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, children: Vec<Node>) -> Option<Vec<Node>> {
        self.0.insert(id.into(), children)
    }

    pub fn with(mut self, id: impl Into<String>, children: Vec<Node>) -> Self {
        self.insert(id, children);
        self
    }

    pub fn get(&self, id: &str) -> Option<&[Node]> {
        self.0.get(id).map(Vec::as_slice)
    }

    /// Ids that own an entry, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<Node>)> for ChildMapping {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Node>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Named, independently expandable partition of the root forest.
///
/// Group expansion is part of the supplied data, not of the expansion state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub label: String,
    #[serde(default, alias = "expanded")]
    pub is_expanded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Group {
    pub fn new(label: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            is_expanded: false,
            title: None,
            nodes,
        }
    }

    pub fn expanded(mut self, is_expanded: bool) -> Self {
        self.is_expanded = is_expanded;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Table input: a flat forest or a mapping of group key to group.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Flat(Vec<Node>),
    Grouped(IndexMap<String, Group>),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Flat(Vec::new())
    }
}

impl DataSource {
    pub fn is_grouped(&self) -> bool {
        matches!(self, DataSource::Grouped(_))
    }

    /// All root-level nodes, across groups when grouped.
    pub fn roots(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        match self {
            DataSource::Flat(nodes) => Box::new(nodes.iter()),
            DataSource::Grouped(groups) => Box::new(groups.values().flat_map(|g| g.nodes.iter())),
        }
    }
}

impl From<Vec<Node>> for DataSource {
    fn from(nodes: Vec<Node>) -> Self {
        DataSource::Flat(nodes)
    }
}

impl From<IndexMap<String, Group>> for DataSource {
    fn from(groups: IndexMap<String, Group>) -> Self {
        DataSource::Grouped(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_node_json_when_deserializing_then_payload_keeps_field_order() {
        let node: Node = serde_json::from_value(json!({
            "id": "a",
            "name": "Alpha",
            "size": 3,
            "children": [{ "id": "a1" }]
        }))
        .unwrap();

        assert_eq!(node.id, "a");
        assert_eq!(
            node.fields.keys().collect::<Vec<_>>(),
            vec!["name", "size"]
        );
        assert_eq!(node.field_text("name").as_deref(), Some("Alpha"));
        assert_eq!(node.field_text("size").as_deref(), Some("3"));
        assert_eq!(node.field_text("id").as_deref(), Some("a"));
        assert_eq!(node.field_text("missing"), None);
        assert_eq!(node.children.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn given_grouped_source_when_listing_roots_then_walks_groups_in_order() {
        let mut groups = IndexMap::new();
        groups.insert("g2".to_string(), Group::new("Second", vec![Node::new("b")]));
        groups.insert("g1".to_string(), Group::new("First", vec![Node::new("a")]));
        let source = DataSource::from(groups);

        let ids: Vec<_> = source.roots().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(source.is_grouped());
    }
}
