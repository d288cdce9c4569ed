//! Integration tests for the flattener: row order and structural metadata.

use rstest::{fixture, rstest};

use treetable::domain::{
    ChildMapping, DataSource, Embedded, ExpansionState, Flattener, Node, Row, VisibleRow,
};
use treetable::util::testing;

fn data_rows<'a>(rows: impl Iterator<Item = Row<'a>>) -> Vec<VisibleRow<'a>> {
    rows.filter_map(|row| row.as_data().copied()).collect()
}

fn ids(rows: &[VisibleRow<'_>]) -> Vec<String> {
    rows.iter().map(|row| row.id().to_string()).collect()
}

#[fixture]
fn forest() -> Vec<Node> {
    testing::init_test_setup();
    vec![Node::new("a"), Node::new("b")]
}

#[fixture]
fn mapping() -> ChildMapping {
    ChildMapping::new().with("a", vec![Node::new("a1")])
}

/// Three levels, embedded:
/// r1 -> [x -> [x1, x2], y -> [y1]], r2 -> [z]
fn deep_forest() -> Vec<Node> {
    vec![
        Node::new("r1").with_children(vec![
            Node::new("x").with_children(vec![Node::new("x1"), Node::new("x2")]),
            Node::new("y").with_children(vec![Node::new("y1")]),
        ]),
        Node::new("r2").with_children(vec![Node::new("z")]),
    ]
}

fn all_expanded() -> ExpansionState {
    ["r1", "r2", "x", "y"].into_iter().map(|id| (id, true)).collect()
}

#[rstest]
fn given_all_collapsed_when_flattening_then_only_roots_are_visible(
    forest: Vec<Node>,
    mapping: ChildMapping,
) {
    let state = ExpansionState::new();
    let rows = data_rows(Flattener::new(&mapping, &state).rows(&forest));

    assert_eq!(ids(&rows), vec!["a", "b"]);
    assert!(!rows[0].is_leaf, "a is not the last sibling");
    assert!(rows[0].has_children);
    assert_eq!(rows[0].total_children, 1);
    assert!(rows[1].is_leaf);
    assert!(!rows[1].has_children);
}

#[rstest]
fn given_expanded_first_root_when_flattening_then_child_inserted_before_next_root(
    forest: Vec<Node>,
    mapping: ChildMapping,
) {
    let state = ExpansionState::new().toggled("a", true);
    let rows = data_rows(Flattener::new(&mapping, &state).rows(&forest));

    assert_eq!(ids(&rows), vec!["a", "a1", "b"]);
    let a1 = rows[1];
    assert_eq!(a1.depth, 1);
    assert_eq!(a1.root_id, "a");
    assert_eq!(a1.parent_id, Some("a"));
    // Roots always hand a fresh leaf chain to their children
    assert!(a1.parent_is_leaf_chain);
    assert!(a1.is_leaf);
    assert!(!rows[0].is_leaf, "expanded with children");
}

#[test]
fn given_deep_tree_when_fully_expanded_then_leaf_chain_follows_last_branches() {
    testing::init_test_setup();
    let roots = deep_forest();
    let state = all_expanded();
    let rows = data_rows(Flattener::new(&Embedded, &state).rows(&roots));

    assert_eq!(
        ids(&rows),
        vec!["r1", "x", "x1", "x2", "y", "y1", "r2", "z"]
    );
    let leaves: Vec<_> = rows
        .iter()
        .filter(|row| row.is_leaf)
        .map(|row| row.id())
        .collect();
    // x is not the last child of r1, so its subtree is off the chain
    assert_eq!(leaves, vec!["y1", "z"]);
}

#[test]
fn given_deep_tree_when_flattening_then_depth_and_root_match_ancestry() {
    let roots = deep_forest();
    let state = all_expanded();
    let rows = data_rows(Flattener::new(&Embedded, &state).rows(&roots));

    let depth_root: Vec<_> = rows
        .iter()
        .map(|row| (row.id(), row.depth, row.root_id))
        .collect();
    assert_eq!(
        depth_root,
        vec![
            ("r1", 0, "r1"),
            ("x", 1, "r1"),
            ("x1", 2, "r1"),
            ("x2", 2, "r1"),
            ("y", 1, "r1"),
            ("y1", 2, "r1"),
            ("r2", 0, "r2"),
            ("z", 1, "r2"),
        ]
    );
}

#[test]
fn given_same_inputs_when_flattening_twice_then_rows_are_identical() {
    let roots = deep_forest();
    let state = all_expanded();
    let flattener = Flattener::new(&Embedded, &state);

    let first = data_rows(flattener.rows(&roots));
    let second = data_rows(flattener.rows(&roots));
    assert_eq!(first, second);
}

#[rstest]
#[case::leaf_node(&["r1", "x"], "x1", 0)]
#[case::two_children(&["r1"], "x", 2)]
#[case::one_child(&["r1"], "y", 1)]
fn given_visible_node_when_expanding_then_rows_grow_by_child_count(
    #[case] open: &[&str],
    #[case] id: &str,
    #[case] added: usize,
) {
    let roots = deep_forest();
    let before: ExpansionState = open.iter().map(|id| (*id, true)).collect();
    let after = before.toggled(id, true);

    let count = |state: &ExpansionState| Flattener::new(&Embedded, state).rows(&roots).count();
    assert_eq!(count(&after) - count(&before), added);
}

#[test]
fn given_titled_node_when_expanding_then_title_row_counts_once() {
    let roots = vec![Node::new("a").with_title("About a"), Node::new("b")];
    let mapping = ChildMapping::new().with("a", vec![Node::new("a1"), Node::new("a2")]);
    let collapsed = ExpansionState::new();
    let expanded = collapsed.toggled("a", true);

    let before = Flattener::new(&mapping, &collapsed).rows(&roots).count();
    let rows: Vec<_> = Flattener::new(&mapping, &expanded).rows(&roots).collect();

    assert_eq!(rows.len() - before, 3);
    match rows[1] {
        Row::Title(title) => {
            assert_eq!(title.title, "About a");
            assert_eq!(title.row.id(), "a");
            assert_eq!(title.row.depth, 0);
        }
        other => panic!("expected title row, got {:?}", other),
    }
}

#[test]
fn given_expanded_node_without_children_when_flattening_then_it_stays_a_leaf() {
    let roots = vec![Node::new("a"), Node::new("b").with_children(vec![])];
    let state = ExpansionState::new().toggled("b", true);
    let rows = data_rows(Flattener::new(&Embedded, &state).rows(&roots));

    assert_eq!(ids(&rows), vec!["a", "b"]);
    assert!(rows[1].is_expanded);
    assert!(!rows[1].has_children);
    assert_eq!(rows[1].total_children, 0);
    assert!(rows[1].is_leaf);
}

#[test]
fn given_mapping_when_node_embeds_children_then_mapping_wins() {
    let roots = vec![Node::new("a").with_children(vec![Node::new("embedded")])];
    let mapping = ChildMapping::new().with("a", vec![Node::new("mapped")]);
    let state = ExpansionState::new().toggled("a", true);

    let rows = data_rows(Flattener::new(&mapping, &state).rows(&roots));
    assert_eq!(ids(&rows), vec!["a", "mapped"]);
}

#[test]
fn given_flat_source_when_flattening_whole_source_then_no_group_headers() {
    let data = DataSource::from(deep_forest());
    let state = ExpansionState::new();
    let rows: Vec<_> = Flattener::new(&Embedded, &state).flatten(&data).collect();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(Row::is_data));
}
