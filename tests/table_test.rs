//! Integration tests for TreeTable rendering, renderer callbacks and the marker control.

use treetable::domain::{ChildMapping, Node};
use treetable::render::{
    CellContext, Column, ExpandRequest, MarkerContext, RenderedRow, TitleContext, TreeTable,
};
use treetable::util::testing;

fn files() -> TreeTable {
    testing::init_test_setup();
    TreeTable::new(
        "files",
        vec![
            Node::new("src")
                .with_field("name", "src")
                .with_field("size", 3)
                .with_title("sources"),
            Node::new("readme").with_field("name", "README.md").with_field("size", 1),
        ],
        vec![
            Column::tree("Name", "name").with_header_style("width", "60%"),
            Column::field("Size", "size").with_cell_style("text-align", "right"),
        ],
    )
    .with_child_mapping(ChildMapping::new().with(
        "src",
        vec![Node::new("lib").with_field("name", "lib.rs").with_field("size", 2)],
    ))
}

fn expand_on_click(ctx: &CellContext<'_>) -> String {
    if ctx.has_children && !ctx.is_expanded {
        ctx.on_expand(ctx.row_id, true);
    }
    ctx.row_id.to_string()
}

fn expand_collapse_marker(ctx: &MarkerContext<'_>) -> String {
    ctx.on_expand_all();
    ctx.on_collapse_all();
    ctx.on_expand_all();
    "[+/-]".to_string()
}

fn shouting_title(ctx: &TitleContext<'_>) -> String {
    format!("{}@{}", ctx.title.to_uppercase(), ctx.depth)
}

#[test]
fn given_collapsed_table_when_rendering_then_headers_and_cells_follow_columns() {
    let pass = files().render();
    let table = pass.table;

    assert!(pass.requests.is_empty());
    assert_eq!(table.table_class(), "files-table");
    assert_eq!(table.head_class(), "files-head");
    assert_eq!(table.body_class(), "files-body");
    assert_eq!(table.headers[0].content, "Name");
    assert_eq!(table.headers[0].styles.get("width").map(String::as_str), Some("60%"));
    assert_eq!(table.rows.len(), 2);

    match &table.rows[0] {
        RenderedRow::Data { attributes, cells } => {
            assert_eq!(attributes.row_id, "src");
            assert!(attributes.has_children);
            assert_eq!(cells[0].content, "▶ src");
            assert_eq!(cells[1].content, "3");
            assert_eq!(
                cells[1].styles.get("text-align").map(String::as_str),
                Some("right")
            );
            assert_eq!(&cells[1].attributes, attributes);
        }
        other => panic!("expected data row, got {:?}", other),
    }
    assert!(table.marker.is_none());
}

#[test]
fn given_expanded_node_when_rendering_then_title_row_spans_columns_with_owner_attributes() {
    let mut table = files();
    table.toggle("src", true);
    let rendered = table.render().table;

    assert_eq!(rendered.rows.len(), 4);
    let title = &rendered.rows[1];
    assert_eq!(title.class(), Some("static-columns"));
    match title {
        RenderedRow::Title {
            attributes,
            colspan,
            content,
        } => {
            assert_eq!(attributes.row_id, "src");
            assert!(attributes.is_expanded);
            assert_eq!(*colspan, 2);
            assert_eq!(content, "sources");
        }
        other => panic!("expected title row, got {:?}", other),
    }
    assert_eq!(rendered.title_class(), "files-title");

    let child = rendered.rows[2].attributes().cloned();
    let child = child.expect("data row attributes");
    assert_eq!(child.row_id, "lib");
    assert_eq!(child.depth, 1);
    assert_eq!(child.root_id, "src");
    assert!(child.is_leaf);
}

#[test]
fn given_custom_title_renderer_when_rendering_then_it_receives_owner_depth() {
    let mut table = files().with_title_renderer(shouting_title);
    table.toggle("src", true);
    let rendered = table.render().table;

    assert!(matches!(
        &rendered.rows[1],
        RenderedRow::Title { content, .. } if content == "SOURCES@0"
    ));
}

#[test]
fn given_cell_callback_when_rendering_then_request_is_applied_after_pass() {
    let mut table = TreeTable::new(
        "t",
        vec![Node::new("a"), Node::new("b")],
        vec![Column::new("Id", "id", expand_on_click)],
    )
    .with_child_mapping(ChildMapping::new().with("a", vec![Node::new("a1")]));

    let pass = table.render();
    assert_eq!(pass.table.rows.len(), 2, "state unchanged during the pass");
    assert_eq!(
        pass.requests,
        vec![ExpandRequest::Toggle {
            id: "a".into(),
            value: true
        }]
    );

    let revision = table.revision();
    table.apply(pass.requests);
    assert_eq!(table.revision(), revision + 1);
    assert_eq!(table.render().table.rows.len(), 3);
}

#[test]
fn given_marker_when_rendering_then_callbacks_map_to_bulk_operations_in_order() {
    let mut table = files().with_marker(expand_collapse_marker);
    let pass = table.render();

    assert_eq!(pass.table.marker.as_deref(), Some("[+/-]"));
    assert_eq!(
        pass.requests,
        vec![
            ExpandRequest::ExpandAll,
            ExpandRequest::CollapseAll,
            ExpandRequest::ExpandAll
        ]
    );

    table.apply(pass.requests);
    assert!(table.expansion().is_expanded("src"));
    assert_eq!(table.rows().len(), 4);
}

#[test]
fn given_rendered_rows_when_listing_data_attributes_then_every_row_has_six_pairs() {
    let mut table = files();
    table.expand_all();
    let rendered = table.render().table;

    for row in &rendered.rows {
        let attributes = row.attributes().expect("ungrouped rows carry attributes");
        let names: Vec<_> = attributes
            .data_attributes()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(
            names,
            vec![
                "data-rowid",
                "data-depth",
                "data-isleaf",
                "data-haschildren",
                "data-isexpanded",
                "data-rootid"
            ]
        );
    }
    assert_eq!(rendered.data_rows().count(), 3);
}
