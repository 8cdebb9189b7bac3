//! LaTeX serializer
//!
//! Produces a `tabularx` environment with `l` columns for covariate names and
//! `X` columns for the models, optionally wrapped in a `table` float.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::core::config::RenderConfig;
use crate::core::table::{
    CellAlign, RuleStyle, Span, TableCell, TableItem, TableModel, TableRule,
};
use crate::utils::escape::escape_latex;

/// Shape of the LaTeX output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LatexMode {
    /// `table` float with `\centering`, caption and label
    #[default]
    Float,
    /// The bare `tabularx` environment
    TabularOnly,
}

/// Serialize a table model as LaTeX
pub fn to_latex(table: &TableModel, config: &RenderConfig, mode: LatexMode) -> String {
    let mut output = String::new();
    let text = |t: &str| {
        if config.escape_text {
            escape_latex(t)
        } else {
            t.to_string()
        }
    };

    if mode == LatexMode::Float {
        output.push_str("\\begin{table}[!htbp] \\centering\n");
        if let Some(title) = &table.title {
            let _ = writeln!(output, "  \\caption{{{}}}", text(title));
        }
        if let Some(label) = &table.label {
            let _ = writeln!(output, "  \\label{{{}}}", label);
        }
    }

    let _ = writeln!(
        output,
        "\\begin{{tabularx}}{{\\textwidth}}{{{}{}}}",
        "l".repeat(table.stub_columns),
        "X".repeat(table.model_columns)
    );

    for item in &table.items {
        match item {
            TableItem::Rule(rule) => write_rule(&mut output, rule, table.col_count()),
            TableItem::Row(row) => {
                let mut slots = Vec::with_capacity(table.col_count());
                for cell in &row.cells {
                    push_cell(&mut slots, cell, &text);
                }
                let _ = writeln!(output, "{} \\\\", slots.join(" & "));
            }
        }
    }

    output.push_str("\\end{tabularx}");
    if mode == LatexMode::Float {
        output.push_str("\n\\end{table}");
    }
    output
}

fn write_rule(output: &mut String, rule: &TableRule, col_count: usize) {
    if rule.is_partial() {
        let (start, end) = rule.columns(col_count);
        // \cline counts columns from 1
        let _ = writeln!(output, "\\cline{{{}-{}}}", start + 1, end);
        return;
    }
    match rule.style {
        RuleStyle::Top => output.push_str("\\\\[-1.8ex]\\hline\n\\hline \\\\[-1.8ex]\n"),
        RuleStyle::Mid => output.push_str("\\hline \\\\[-1.8ex]\n"),
        RuleStyle::Bottom => output.push_str("\\hline\n\\hline \\\\[-1.8ex]\n"),
    }
}

/// Add a cell's column slots; spanned or realigned cells use `\multicolumn`
fn push_cell(slots: &mut Vec<String>, cell: &TableCell, text: &impl Fn(&str) -> String) {
    let realigned = matches!(cell.align, Some(CellAlign::Center | CellAlign::Right));
    if cell.is_empty() && !realigned {
        slots.extend(std::iter::repeat(String::new()).take(cell.colspan));
        return;
    }

    let mut content = String::new();
    for span in &cell.content {
        match span {
            Span::Text(t) => content.push_str(&text(t)),
            Span::Italic(t) => {
                let _ = write!(content, "\\textit{{{}}}", text(t));
            }
            Span::Superscript(t) => {
                let _ = write!(content, "$^{{{}}}$", text(t));
            }
            Span::LessThan => content.push_str("$<$"),
        }
    }

    if cell.colspan > 1 || realigned {
        let align = cell.align.unwrap_or(CellAlign::Left).to_char();
        slots.push(format!(
            "\\multicolumn{{{}}}{{{}}}{{{}}}",
            cell.colspan, align, content
        ));
    } else {
        slots.push(content);
    }
}
