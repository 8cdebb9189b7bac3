//! HTML serializer
//!
//! Emits a single `<table>` styled inline, one `<tr>` per line. Rules become
//! empty rows with a bottom border.

use std::fmt::Write;

use crate::core::config::RenderConfig;
use crate::core::table::{CellAlign, Span, TableCell, TableItem, TableModel, TableRule};
use crate::utils::escape::escape_html;

const RULE_STYLE: &str = "border-bottom: 1px solid black";

/// Serialize a table model as HTML
pub fn to_html(table: &TableModel, config: &RenderConfig) -> String {
    let mut output = String::new();
    let text = |t: &str| {
        if config.escape_text {
            escape_html(t)
        } else {
            t.to_string()
        }
    };

    if let Some(title) = &table.title {
        let _ = write!(output, "{}<br>", text(title));
    }
    output.push_str("<table style=\"text-align:center\">\n");

    for item in &table.items {
        match item {
            TableItem::Rule(rule) => write_rule(&mut output, rule, table.col_count()),
            TableItem::Row(row) => {
                output.push_str("<tr>");
                for cell in &row.cells {
                    write_cell(&mut output, cell, &text);
                }
                output.push_str("</tr>\n");
            }
        }
    }

    output.push_str("</table>");
    output
}

fn write_rule(output: &mut String, rule: &TableRule, col_count: usize) {
    let (start, end) = rule.columns(col_count);
    output.push_str("<tr>");
    if start > 0 {
        let _ = write!(output, "<td colspan=\"{}\"></td>", start);
    }
    let _ = write!(
        output,
        "<td colspan=\"{}\" style=\"{}\"></td>",
        end - start,
        RULE_STYLE
    );
    if end < col_count {
        let _ = write!(output, "<td colspan=\"{}\"></td>", col_count - end);
    }
    output.push_str("</tr>\n");
}

fn write_cell(output: &mut String, cell: &TableCell, text: &impl Fn(&str) -> String) {
    output.push_str("<td");
    if cell.colspan > 1 {
        let _ = write!(output, " colspan=\"{}\"", cell.colspan);
    }
    match cell.align {
        Some(CellAlign::Left) => output.push_str(" style=\"text-align:left\""),
        Some(CellAlign::Right) => output.push_str(" style=\"text-align:right\""),
        Some(CellAlign::Center) | None => {}
    }
    output.push('>');
    for span in &cell.content {
        match span {
            Span::Text(t) => output.push_str(&text(t)),
            Span::Italic(t) => {
                let _ = write!(output, "<em>{}</em>", text(t));
            }
            Span::Superscript(t) => {
                let _ = write!(output, "<sup>{}</sup>", text(t));
            }
            Span::LessThan => output.push_str("&lt;"),
        }
    }
    output.push_str("</td>");
}
