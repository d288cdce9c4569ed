use termtree::Tree;

use crate::domain::{Row, VisibleRow};

/// Tree outline of flattened rows, rebuilt from their depths.
///
/// Group headers sit directly under the root, data rows under their group
/// (or the root when ungrouped), title rows under the node that owns them.
pub fn to_outline(root: &str, rows: &[Row<'_>], accessor: Option<&str>) -> Tree<String> {
    let label = |row: &VisibleRow<'_>| {
        accessor
            .and_then(|name| row.node.field_text(name))
            .unwrap_or_else(|| row.id().to_string())
    };
    let grouped = rows.iter().any(|row| matches!(row, Row::GroupHeader(_)));
    let offset = usize::from(grouped);

    let mut stack = vec![Tree::new(root.to_string())];
    for row in rows {
        let (level, text) = match row {
            Row::GroupHeader(group) => (1, format!("[{}] {}", group.group_key, group.label)),
            Row::Data(data) => (data.depth + 1 + offset, label(data)),
            Row::Title(title) => (title.row.depth + 2 + offset, format!("» {}", title.title)),
        };
        fold_to(&mut stack, level);
        stack.push(Tree::new(text));
    }
    fold_to(&mut stack, 1);
    stack.pop().unwrap_or_else(|| Tree::new(root.to_string()))
}

/// Attach finished subtrees to their parents until `level` entries remain.
fn fold_to(stack: &mut Vec<Tree<String>>, level: usize) {
    while stack.len() > level.max(1) {
        if let Some(done) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                parent.push(done);
            }
        }
    }
}
