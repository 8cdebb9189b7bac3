//! Assembly of the abstract row model
//!
//! [`TableBuilder`] walks the normalized data once and emits header, body
//! and footer sections as a flat list of rows and rules. It makes every
//! display decision; the serializers only choose markup.

use super::cell::{CellAlign, Span, TableCell};
use super::rule::TableRule;
use crate::core::config::{ColumnLabels, RenderConfig};
use crate::core::model::{CoefficientRecord, CovariateKey, ModelStatistics};
use crate::core::normalize::NormalizedData;
use crate::utils::format::{format_count, format_level, format_value};

/// Section a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Estimate,
    Precision,
    Statistic,
    Note,
}

/// A table row
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub kind: RowKind,
}

impl TableRow {
    pub fn new(kind: RowKind) -> Self {
        TableRow {
            cells: Vec::new(),
            kind,
        }
    }

    /// Number of grid columns covered by the cells
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.colspan).sum()
    }
}

/// One entry of the table, in output order
#[derive(Debug, Clone, PartialEq)]
pub enum TableItem {
    Row(TableRow),
    Rule(TableRule),
}

/// Format-independent table
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    /// Caption, only set when the header is shown
    pub title: Option<String>,
    /// LaTeX label, only set when the header is shown
    pub label: Option<String>,
    /// Columns holding covariate names (one per index level)
    pub stub_columns: usize,
    pub model_columns: usize,
    pub items: Vec<TableItem>,
}

impl TableModel {
    pub fn col_count(&self) -> usize {
        self.stub_columns + self.model_columns
    }

    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.items.iter().filter_map(|item| match item {
            TableItem::Row(row) => Some(row),
            TableItem::Rule(_) => None,
        })
    }

    pub fn rows_of(&self, kind: RowKind) -> impl Iterator<Item = &TableRow> {
        self.rows().filter(move |row| row.kind == kind)
    }

    pub fn rules(&self) -> impl Iterator<Item = &TableRule> {
        self.items.iter().filter_map(|item| match item {
            TableItem::Rule(rule) => Some(rule),
            TableItem::Row(_) => None,
        })
    }
}

/// Builds a [`TableModel`] from normalized data and a configuration
pub struct TableBuilder<'a> {
    data: &'a NormalizedData,
    config: &'a RenderConfig,
    items: Vec<TableItem>,
}

impl<'a> TableBuilder<'a> {
    pub fn new(data: &'a NormalizedData, config: &'a RenderConfig) -> Self {
        TableBuilder {
            data,
            config,
            items: Vec::new(),
        }
    }

    /// Assemble every section
    pub fn build(mut self) -> TableModel {
        if self.config.show_header {
            self.header();
        }
        self.body();
        self.items.push(TableItem::Rule(TableRule::mid()));
        if self.config.show_footer {
            self.statistics();
            self.items.push(TableItem::Rule(TableRule::bottom()));
            if self.config.show_notes {
                self.notes();
            }
        }

        log::trace!("assembled table with {} items", self.items.len());
        let (title, label) = if self.config.show_header {
            (
                self.config.title.clone(),
                Some(self.config.latex_label.clone()),
            )
        } else {
            (None, None)
        };

        TableModel {
            title,
            label,
            stub_columns: self.stub_columns(),
            model_columns: self.data.num_models(),
            items: self.items,
        }
    }

    fn stub_columns(&self) -> usize {
        self.data.index().levels()
    }

    fn num_models(&self) -> usize {
        self.data.num_models()
    }

    fn digits(&self) -> u32 {
        self.config.significant_digits()
    }

    fn stub_filler(&self) -> TableCell {
        TableCell::empty().spanning(self.stub_columns())
    }

    fn push_row(&mut self, kind: RowKind, cells: Vec<TableCell>) {
        self.items.push(TableItem::Row(TableRow { cells, kind }));
    }

    fn header(&mut self) {
        let config = self.config;
        let stub = self.stub_columns();
        let models = self.num_models();
        self.items.push(TableItem::Rule(TableRule::top()));

        if let Some(name) = &config.model_name {
            let banner = TableCell::from_spans(vec![Span::Italic(name.clone())])
                .spanning(models)
                .aligned(CellAlign::Center);
            self.push_row(RowKind::Header, vec![self.stub_filler(), banner]);
            self.items
                .push(TableItem::Rule(TableRule::partial(stub, stub + models)));
        }

        match config.column_labels() {
            Some(ColumnLabels::Single(label)) => {
                let cell = TableCell::new(label.clone())
                    .spanning(models)
                    .aligned(CellAlign::Center);
                self.push_row(RowKind::Header, vec![self.stub_filler(), cell]);
            }
            Some(ColumnLabels::Groups(groups)) => {
                let mut cells = vec![self.stub_filler()];
                cells.extend(groups.iter().map(|(label, span)| {
                    TableCell::new(label.clone())
                        .spanning(*span)
                        .aligned(CellAlign::Center)
                }));
                self.push_row(RowKind::Header, cells);
            }
            None => {}
        }

        if config.show_model_numbers {
            let mut cells = vec![self.stub_filler()];
            cells.extend((1..=models).map(|n| TableCell::new(format!("({})", n))));
            self.push_row(RowKind::Header, cells);
        }

        self.items.push(TableItem::Rule(TableRule::mid()));
    }

    fn body(&mut self) {
        let data = self.data;
        let config = self.config;
        let keys: Vec<&CovariateKey> = match config.covariate_order() {
            Some(order) => order.iter().collect(),
            None => data.index().keys().collect(),
        };

        for key in keys {
            let estimates = self.estimate_row(key);
            self.push_row(RowKind::Estimate, estimates);
            if config.show_precision {
                let mut cells = vec![self.stub_filler()];
                cells.extend(data.models().iter().map(|model| {
                    model
                        .coefficient(key)
                        .and_then(|rec| self.precision_text(rec))
                        .map(TableCell::new)
                        .unwrap_or_else(TableCell::empty)
                }));
                self.push_row(RowKind::Precision, cells);
            }
        }
    }

    fn estimate_row(&self, key: &CovariateKey) -> Vec<TableCell> {
        let data = self.data;
        let mut cells = Vec::with_capacity(self.stub_columns() + self.num_models());

        // Group levels come collapsed from the index, the leaf is renamed
        let groups = data
            .index()
            .first_column(key)
            .map(|labels| &labels[..labels.len().saturating_sub(1)])
            .unwrap_or(&[]);
        cells.extend(
            groups
                .iter()
                .map(|label| TableCell::new(label.clone()).aligned(CellAlign::Left)),
        );
        cells.push(TableCell::new(self.config.display_name(key)).aligned(CellAlign::Left));

        for (i, model) in data.models().iter().enumerate() {
            let cell = match model.coefficient(key) {
                Some(rec) => {
                    let stars = data.stars(i).map_or(0, |s| s.coefficient(key));
                    self.starred(Some(rec.value), stars)
                }
                None => TableCell::empty(),
            };
            cells.push(cell);
        }
        cells
    }

    fn precision_text(&self, rec: &CoefficientRecord) -> Option<String> {
        let digits = self.digits();
        if self.config.confidence_intervals {
            let lower = format_value(rec.ci_lower, digits)?;
            let upper = format_value(rec.ci_upper, digits)?;
            Some(format!("({}, {})", lower, upper))
        } else {
            format_value(rec.std_error, digits).map(|se| format!("({})", se))
        }
    }

    /// Rounded value followed by its stars, empty when undefined
    fn starred(&self, value: Option<f64>, stars: usize) -> TableCell {
        match format_value(value, self.digits()) {
            Some(text) => {
                let mut cell = TableCell::new(text);
                if self.config.show_sig && stars > 0 {
                    cell.push(Span::Superscript("*".repeat(stars)));
                }
                cell
            }
            None => TableCell::empty(),
        }
    }

    fn statistics(&mut self) {
        let digits = self.digits();
        let config = self.config;

        if config.show_n {
            self.statistic_row(vec![Span::Text("Observations".into())], |_, (_, stats)| {
                TableCell::new(format_count(stats.observations(), digits).unwrap_or_default())
            });
        }
        if config.show_r2 {
            self.statistic_row(r_squared_label(""), |_, (_, stats)| {
                TableCell::new(format_value(stats.r_squared, digits).unwrap_or_default())
            });
        }
        if config.show_adj_r2 {
            self.statistic_row(r_squared_label("Adjusted "), |_, (_, stats)| {
                TableCell::new(format_value(stats.adj_r_squared, digits).unwrap_or_default())
            });
        }
        if config.show_residual_std_err {
            self.statistic_row(vec![Span::Text("Residual Std. Error".into())], |_, (_, stats)| {
                match format_value(stats.residual_std_error(), digits) {
                    Some(mut text) => {
                        if config.show_dof {
                            if let Some(df) = format_count(stats.df_resid, digits) {
                                text.push_str(&format!(" (df = {})", df));
                            }
                        }
                        TableCell::new(text)
                    }
                    None => TableCell::empty(),
                }
            });
        }
        if config.show_f_statistic {
            self.statistic_row(vec![Span::Text("F Statistic".into())], |builder, (i, stats)| {
                let stars = builder.data.stars(i).map_or(0, |s| s.f_statistic);
                let mut cell = builder.starred(stats.f_statistic, stars);
                if config.show_dof && !cell.is_empty() {
                    if let Some(dof) = f_dof_annotation(stats, digits) {
                        cell.push(Span::Text(format!(" {}", dof)));
                    }
                }
                cell
            });
        }
    }

    fn statistic_row<F>(&mut self, label: Vec<Span>, value: F)
    where
        F: Fn(&Self, (usize, &ModelStatistics)) -> TableCell,
    {
        let mut cells = vec![TableCell::from_spans(label)
            .spanning(self.stub_columns())
            .aligned(CellAlign::Left)];
        cells.extend(
            self.data
                .models()
                .iter()
                .enumerate()
                .map(|(i, model)| value(self, (i, &model.statistics))),
        );
        self.push_row(RowKind::Statistic, cells);
    }

    fn notes(&mut self) {
        let config = self.config;
        let rest = self.stub_columns() + self.num_models() - 1;
        let label = TableCell::from_spans(vec![Span::Italic(config.notes_label.clone())])
            .aligned(CellAlign::Left);
        let note_cell = |text: &str| {
            TableCell::from_spans(vec![Span::Italic(text.to_string())])
                .spanning(rest)
                .aligned(CellAlign::Right)
        };

        let mut notes = config.custom_notes.iter();
        let mut first_line = vec![label];
        if config.notes_append {
            first_line.push(
                TableCell::from_spans(self.legend())
                    .spanning(rest)
                    .aligned(CellAlign::Right),
            );
        } else if let Some(note) = notes.next() {
            first_line.push(note_cell(note));
        }
        self.push_row(RowKind::Note, first_line);

        for note in notes {
            self.push_row(RowKind::Note, vec![TableCell::empty(), note_cell(note)]);
        }
    }

    /// Significance legend, strictest level first: `***p<0.01; **p<0.05; *p<0.1`
    fn legend(&self) -> Vec<Span> {
        let levels = self.config.significance_levels();
        let n = levels.len();
        let mut spans = Vec::new();
        for (i, level) in levels.ascending().enumerate() {
            if i > 0 {
                spans.push(Span::Text("; ".into()));
            }
            spans.push(Span::Superscript("*".repeat(n - i)));
            spans.push(Span::Text("p".into()));
            spans.push(Span::LessThan);
            spans.push(Span::Text(format_level(level)));
        }
        spans
    }
}

fn r_squared_label(prefix: &str) -> Vec<Span> {
    vec![
        Span::Text(format!("{}R", prefix)),
        Span::Superscript("2".into()),
    ]
}

/// `(df = a; b)`, dropped only when both sides are undefined
fn f_dof_annotation(stats: &ModelStatistics, digits: u32) -> Option<String> {
    let df_model = format_count(stats.df_model, digits);
    let df_resid = format_count(stats.df_resid, digits);
    if df_model.is_none() && df_resid.is_none() {
        return None;
    }
    Some(format!(
        "(df = {}; {})",
        df_model.unwrap_or_default(),
        df_resid.unwrap_or_default()
    ))
}
