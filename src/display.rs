//! Console rendering
//!
//! Pure string builders; the session loops print what these return.

use crate::db::schema::Table;
use crate::db::types::QueryResults;
use crate::models::MenuItem;
use mongodb::bson::{Bson, Document};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

/// Render a table's rows in its fixed-width column layout.
///
/// Header and rows share one layout. Cells wider than their column are
/// cut by display width so CJK text keeps the columns aligned.
pub fn render_table(table: Table, results: &QueryResults) -> String {
    let specs = table.columns();
    let mut out = String::new();

    for spec in specs {
        push_cell(&mut out, spec.header, spec.width);
    }
    finish_line(&mut out);

    let rule_width: usize = specs.iter().map(|s| s.width).sum();
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');

    for row in &results.rows {
        for (spec, cell) in specs.iter().zip(&row.values) {
            push_cell(&mut out, &cell.display_string(), spec.width);
        }
        finish_line(&mut out);
    }

    let count = results.row_count();
    out.push_str(&format!(
        "({} {})\n",
        count,
        if count == 1 { "row" } else { "rows" }
    ));
    out
}

/// Left-align `text` in `width` cells, keeping at least one cell of gap
fn push_cell(out: &mut String, text: &str, width: usize) {
    let (shown, used) = text.unicode_truncate(width.saturating_sub(1));
    out.push_str(shown);
    out.push_str(&" ".repeat(width - used));
}

fn finish_line(out: &mut String) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}

/// Numbered menu with dot leaders up to the price column
pub fn menu_listing(items: &[MenuItem]) -> String {
    let label_width = items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}) {}", i + 1, item.name).width())
        .max()
        .unwrap_or(0)
        + 3;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let label = format!("{}) {}", i + 1, item.name);
            let dots = ".".repeat(label_width - label.width());
            format!("{} {} ${:.2}\n    {}\n", label, dots, item.price, item.description)
        })
        .collect()
}

/// Relaxed extended JSON, the same shape the mongo shell prints
pub fn document_json(document: &Document) -> String {
    Bson::Document(document.clone())
        .into_relaxed_extjson()
        .to_string()
}

/// `[1] {...}` listing used by the product and order views
pub fn document_listing(documents: &[Document]) -> String {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("[{}] {}\n\n", i + 1, document_json(doc)))
        .collect()
}
