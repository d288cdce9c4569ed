//! Title, group-title and marker renderers

use crate::domain::Node;
use crate::render::requests::ExpandHandle;

pub struct TitleContext<'a> {
    pub data: &'a Node,
    pub depth: usize,
    pub title: &'a str,
}

/// Renders the title row beneath an expanded node.
pub trait TitleRenderer {
    fn render(&self, ctx: &TitleContext<'_>) -> String;
}

impl<F> TitleRenderer for F
where
    F: Fn(&TitleContext<'_>) -> String,
{
    fn render(&self, ctx: &TitleContext<'_>) -> String {
        self(ctx)
    }
}

/// Shows the node's title text as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTitle;

impl TitleRenderer for PlainTitle {
    fn render(&self, ctx: &TitleContext<'_>) -> String {
        ctx.title.to_string()
    }
}

pub struct GroupTitleContext<'a> {
    pub group_key: &'a str,
    pub label: &'a str,
    pub is_expanded: bool,
    pub count: usize,
    pub index: usize,
    pub title: Option<&'a str>,
}

/// Renders the header row of a group.
pub trait GroupTitleRenderer {
    fn render(&self, ctx: &GroupTitleContext<'_>) -> String;
}

impl<F> GroupTitleRenderer for F
where
    F: Fn(&GroupTitleContext<'_>) -> String,
{
    fn render(&self, ctx: &GroupTitleContext<'_>) -> String {
        self(ctx)
    }
}

/// `▼ Label (count)`, followed by the group title when present.
#[derive(Debug, Clone)]
pub struct PlainGroupTitle {
    pub expanded_marker: String,
    pub collapsed_marker: String,
}

impl Default for PlainGroupTitle {
    fn default() -> Self {
        Self {
            expanded_marker: "▼".into(),
            collapsed_marker: "▶".into(),
        }
    }
}

impl GroupTitleRenderer for PlainGroupTitle {
    fn render(&self, ctx: &GroupTitleContext<'_>) -> String {
        let marker = if ctx.is_expanded {
            &self.expanded_marker
        } else {
            &self.collapsed_marker
        };
        match ctx.title {
            Some(title) => format!("{} {} ({}): {}", marker, ctx.label, ctx.count, title),
            None => format!("{} {} ({})", marker, ctx.label, ctx.count),
        }
    }
}

/// Callbacks handed to the marker control.
pub struct MarkerContext<'a> {
    expand: ExpandHandle<'a>,
}

impl<'a> MarkerContext<'a> {
    pub(crate) fn new(expand: ExpandHandle<'a>) -> Self {
        Self { expand }
    }

    pub fn on_expand_all(&self) {
        self.expand.expand_all();
    }

    pub fn on_collapse_all(&self) {
        self.expand.collapse_all();
    }
}

/// Optional expand-all/collapse-all control rendered beside the table.
pub trait MarkerRenderer {
    fn render(&self, ctx: &MarkerContext<'_>) -> String;
}

impl<F> MarkerRenderer for F
where
    F: Fn(&MarkerContext<'_>) -> String,
{
    fn render(&self, ctx: &MarkerContext<'_>) -> String {
        self(ctx)
    }
}
