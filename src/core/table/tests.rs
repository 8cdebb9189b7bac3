//! Tests for table assembly

use indexmap::IndexMap;

use super::builder::{RowKind, TableBuilder, TableItem, TableModel};
use super::cell::{CellAlign, Span};
use super::rule::{RuleStyle, TableRule};
use crate::core::config::RenderConfig;
use crate::core::model::{CoefficientRecord, CovariateKey, ModelStatistics, ModelSummary};
use crate::core::normalize::NormalizedData;

fn model(params: &[(CovariateKey, f64, f64)], stats: ModelStatistics) -> ModelSummary {
    let coefficients: IndexMap<_, _> = params
        .iter()
        .map(|(key, value, p)| {
            (
                key.clone(),
                CoefficientRecord::new(*value)
                    .with_p_value(*p)
                    .with_std_error(0.1)
                    .with_ci(value - 0.2, value + 0.2),
            )
        })
        .collect();
    ModelSummary::new(coefficients, stats)
}

fn fit_stats() -> ModelStatistics {
    ModelStatistics {
        r_squared: Some(0.25),
        adj_r_squared: Some(0.2),
        scale: Some(2.25),
        f_statistic: Some(8.5),
        f_p_value: Some(0.004),
        df_model: Some(2.0),
        df_resid: Some(97.0),
        ..Default::default()
    }
}

fn data() -> NormalizedData {
    let c = CovariateKey::new("const");
    let x = CovariateKey::new("x");
    let z = CovariateKey::new("z");
    let models = vec![
        model(&[(c.clone(), 1.0, 0.001), (x, 0.5, 0.04)], fit_stats()),
        model(&[(c, 0.8, 0.2), (z, -0.1, 0.5)], ModelStatistics::default()),
    ];
    NormalizedData::new(models, &RenderConfig::default().significance_levels().clone())
        .unwrap()
}

fn build(config: &RenderConfig) -> TableModel {
    TableBuilder::new(&data(), config).build()
}

fn texts(model: &TableModel, kind: RowKind) -> Vec<Vec<String>> {
    model
        .rows_of(kind)
        .map(|row| row.cells.iter().map(|c| c.plain_text()).collect())
        .collect()
}

#[test]
fn test_section_order() {
    let table = build(&RenderConfig::default());
    let kinds: Vec<&str> = table
        .items
        .iter()
        .map(|item| match item {
            TableItem::Rule(rule) => match rule.style {
                RuleStyle::Top => "top",
                RuleStyle::Mid => "mid",
                RuleStyle::Bottom => "bottom",
            },
            TableItem::Row(row) => match row.kind {
                RowKind::Header => "header",
                RowKind::Estimate => "estimate",
                RowKind::Precision => "precision",
                RowKind::Statistic => "statistic",
                RowKind::Note => "note",
            },
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "top", "header", "mid", "estimate", "precision", "estimate", "precision",
            "estimate", "precision", "mid", "statistic", "statistic", "statistic",
            "statistic", "bottom", "note",
        ]
    );
}

#[test]
fn test_estimate_rows() {
    let table = build(&RenderConfig::default());
    assert_eq!(
        texts(&table, RowKind::Estimate),
        vec![
            vec!["const", "1.0****", "0.8"],
            vec!["x", "0.5**", ""],
            vec!["z", "", "-0.1"],
        ]
    );
    assert_eq!(
        texts(&table, RowKind::Precision),
        vec![
            vec!["", "(0.1)", "(0.1)"],
            vec!["", "(0.1)", ""],
            vec!["", "", "(0.1)"],
        ]
    );
}

#[test]
fn test_stars_are_superscript() {
    let table = build(&RenderConfig::default());
    let first = table.rows_of(RowKind::Estimate).next().unwrap();
    assert_eq!(
        first.cells[1].content,
        vec![Span::Text("1.0".into()), Span::Superscript("****".into())]
    );

    let mut config = RenderConfig::default();
    config.show_sig = false;
    let plain = build(&config);
    let first = plain.rows_of(RowKind::Estimate).next().unwrap();
    assert_eq!(first.cells[1].content, vec![Span::Text("1.0".into())]);
}

#[test]
fn test_confidence_intervals() {
    let mut config = RenderConfig::default();
    config.confidence_intervals = true;
    let table = build(&config);
    assert_eq!(texts(&table, RowKind::Precision)[0][1], "(0.8, 1.2)");
}

#[test]
fn test_precision_hidden() {
    let mut config = RenderConfig::default();
    config.show_precision = false;
    let table = build(&config);
    assert_eq!(table.rows_of(RowKind::Precision).count(), 0);
    assert_eq!(table.rows_of(RowKind::Estimate).count(), 3);
}

#[test]
fn test_statistic_rows() {
    let table = build(&RenderConfig::full());
    let stats = texts(&table, RowKind::Statistic);
    assert_eq!(stats[0], vec!["Observations", "100", ""]);
    assert_eq!(stats[1], vec!["R2", "0.25", ""]);
    assert_eq!(stats[2], vec!["Adjusted R2", "0.2", ""]);
    assert_eq!(stats[3], vec!["Residual Std. Error", "1.5 (df = 97)", ""]);
    assert_eq!(stats[4], vec!["F Statistic", "8.5**** (df = 2; 97)", ""]);
}

#[test]
fn test_f_dof_with_one_side_missing() {
    let stats = ModelStatistics {
        f_statistic: Some(3.0),
        df_model: Some(3.0),
        ..Default::default()
    };
    let x = CovariateKey::new("x");
    let data = NormalizedData::new(
        vec![model(&[(x, 1.0, 0.5)], stats)],
        &RenderConfig::default().significance_levels().clone(),
    )
    .unwrap();
    let mut config = RenderConfig::default();
    config.show_dof = true;
    let table = TableBuilder::new(&data, &config).build();
    let f_row = table.rows_of(RowKind::Statistic).last().unwrap();
    assert_eq!(f_row.cells[1].plain_text(), "3.0 (df = 3; )");
}

#[test]
fn test_header_rows() {
    let mut config = RenderConfig::default();
    config.model_name = Some("OLS".into());
    config
        .set_column_groups(vec!["Wage".into()], vec![2], 2)
        .unwrap();
    let table = build(&config);
    assert_eq!(
        texts(&table, RowKind::Header),
        vec![
            vec!["", "OLS"],
            vec!["", "Wage"],
            vec!["", "(1)", "(2)"],
        ]
    );
    let banner = table.rows_of(RowKind::Header).next().unwrap();
    assert_eq!(banner.cells[1].colspan, 2);
    assert_eq!(banner.cells[1].content, vec![Span::Italic("OLS".into())]);
    assert!(table.rules().any(|r| *r == TableRule::partial(1, 3)));
}

#[test]
fn test_header_hidden() {
    let mut config = RenderConfig::default();
    config.show_header = false;
    config.title = Some("Hidden".into());
    let table = build(&config);
    assert_eq!(table.title, None);
    assert_eq!(table.label, None);
    assert_eq!(table.rows_of(RowKind::Header).count(), 0);
    assert!(!table.rules().any(|r| r.style == RuleStyle::Top));
}

#[test]
fn test_footer_hidden() {
    let mut config = RenderConfig::default();
    config.show_footer = false;
    let table = build(&config);
    assert_eq!(table.rows_of(RowKind::Statistic).count(), 0);
    assert_eq!(table.rows_of(RowKind::Note).count(), 0);
    assert!(matches!(
        table.items.last(),
        Some(TableItem::Rule(TableRule {
            style: RuleStyle::Mid,
            ..
        }))
    ));
}

#[test]
fn test_notes_appended() {
    let mut config = RenderConfig::default();
    config.custom_notes = vec!["Robust errors".into(), "Sample: 2020".into()];
    let table = build(&config);
    let notes = texts(&table, RowKind::Note);
    assert_eq!(
        notes,
        vec![
            vec!["Note:", "****p<0.01; ***p<0.03; **p<0.05; *p<0.1"],
            vec!["", "Robust errors"],
            vec!["", "Sample: 2020"],
        ]
    );
    let legend = &table.rows_of(RowKind::Note).next().unwrap().cells[1];
    assert_eq!(legend.colspan, 2);
    assert_eq!(legend.align, Some(CellAlign::Right));
}

#[test]
fn test_notes_not_appended() {
    let mut config = RenderConfig::default();
    config.notes_append = false;
    config.custom_notes = vec!["First".into(), "Second".into()];
    let table = build(&config);
    assert_eq!(
        texts(&table, RowKind::Note),
        vec![vec!["Note:", "First"], vec!["", "Second"]]
    );
    let first = &table.rows_of(RowKind::Note).next().unwrap().cells[1];
    assert_eq!(first.content, vec![Span::Italic("First".into())]);
}

#[test]
fn test_hierarchical_first_column() {
    let keys = [
        CovariateKey::from(("educ", "college")),
        CovariateKey::from(("educ", "high school")),
        CovariateKey::from(("region", "north")),
    ];
    let params: Vec<_> = keys.iter().map(|k| (k.clone(), 1.0, 0.5)).collect();
    let data = NormalizedData::new(
        vec![model(&params, ModelStatistics::default())],
        &RenderConfig::default().significance_levels().clone(),
    )
    .unwrap();
    let mut config = RenderConfig::default();
    config.rename.insert("north".into(), "North".into());
    let table = TableBuilder::new(&data, &config).build();

    assert_eq!(table.stub_columns, 2);
    assert_eq!(
        texts(&table, RowKind::Estimate),
        vec![
            vec!["educ", "college", "1.0"],
            vec!["", "high school", "1.0"],
            vec!["region", "North", "1.0"],
        ]
    );
    let obs = table.rows_of(RowKind::Statistic).next().unwrap();
    assert_eq!(obs.cells[0].colspan, 2);
    assert_eq!(obs.width(), table.col_count());
}

#[test]
fn test_covariate_order_keeps_collapse() {
    let keys = [
        CovariateKey::from(("a", "x")),
        CovariateKey::from(("a", "y")),
        CovariateKey::from(("b", "x")),
    ];
    let params: Vec<_> = keys.iter().map(|k| (k.clone(), 1.0, 0.5)).collect();
    let data = NormalizedData::new(
        vec![model(&params, ModelStatistics::default())],
        &RenderConfig::default().significance_levels().clone(),
    )
    .unwrap();
    let mut config = RenderConfig::default();
    config.set_covariate_order(Some(vec![keys[1].clone(), keys[0].clone()]));
    let table = TableBuilder::new(&data, &config).build();
    let firsts: Vec<String> = table
        .rows_of(RowKind::Estimate)
        .map(|row| row.cells[0].plain_text())
        .collect();
    assert_eq!(firsts, vec!["", "a"]);
}
