//! Plain-text layout of a rendered table for terminals

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::render::output::{RenderedRow, RenderedTable};

const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    /// Spaces per depth level for title rows
    pub indent: usize,
    pub color: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            color: false,
        }
    }
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

/// Column-aligned text: header line, rule, then one line per row.
///
/// Title and group rows span all columns and are not part of the width
/// computation.
pub fn format_table(table: &RenderedTable, options: TextOptions) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.content.width()).collect();
    for row in &table.rows {
        if let RenderedRow::Data { cells, .. } = row {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.content.width());
            }
        }
    }
    let rule_width =
        widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);

    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    let header = join_padded(table.headers.iter().map(|h| h.content.as_str()), &widths);
    lines.push(if options.color {
        header.bold().to_string()
    } else {
        header
    });
    lines.push("─".repeat(rule_width));

    for row in &table.rows {
        let line = match row {
            RenderedRow::Data { cells, .. } => {
                join_padded(cells.iter().map(|c| c.content.as_str()), &widths)
            }
            RenderedRow::Title {
                attributes,
                content,
                ..
            } => {
                let text = format!(
                    "{}{}",
                    " ".repeat((attributes.depth + 1) * options.indent),
                    content
                );
                if options.color {
                    text.dimmed().to_string()
                } else {
                    text
                }
            }
            RenderedRow::GroupHeader { content, .. } => {
                if options.color {
                    content.cyan().bold().to_string()
                } else {
                    content.clone()
                }
            }
        };
        lines.push(line);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One line per row listing its class and structural `data-*` attributes,
/// followed by the rendered content after a `|`.
pub fn format_attributes(table: &RenderedTable) -> String {
    let mut out = format!(
        "{} > {} | {}\n",
        table.table_class(),
        table.head_class(),
        table
            .headers
            .iter()
            .map(|h| h.content.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    );
    for row in &table.rows {
        let mut parts: Vec<String> = vec![table.body_class()];
        if let Some(class) = row.class() {
            parts.push(format!("class={}", class));
        }
        match row {
            RenderedRow::GroupHeader {
                group_key, colspan, ..
            } => {
                parts.push(format!("data-group={}", group_key));
                parts.push(format!("colspan={}", colspan));
            }
            RenderedRow::Title { colspan, .. } => parts.push(format!("colspan={}", colspan)),
            RenderedRow::Data { .. } => {}
        }
        if let Some(attributes) = row.attributes() {
            parts.extend(
                attributes
                    .data_attributes()
                    .iter()
                    .map(|(name, value)| format!("{}={}", name, value)),
            );
        }
        let content = match row {
            RenderedRow::Data { cells, .. } => cells
                .iter()
                .map(|c| c.content.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
            RenderedRow::Title { content, .. } => format!("{}: {}", table.title_class(), content),
            RenderedRow::GroupHeader { content, .. } => content.clone(),
        };
        out.push_str(&format!("{} | {}\n", parts.join(" "), content));
    }
    if let Some(marker) = &table.marker {
        out.push_str(&format!("marker | {}\n", marker));
    }
    out
}
