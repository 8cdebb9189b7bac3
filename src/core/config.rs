//! Display options of a regression table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::model::CovariateKey;
use super::normalize::SignificanceLevels;
use crate::utils::error::{Result, StargazerError};

/// Largest accepted number of decimals
pub const MAX_SIGNIFICANT_DIGITS: u32 = 9;

/// Labels shown above the model columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnLabels {
    /// One label spanning every model
    Single(String),
    /// `(label, span)` groups covering the models left to right
    Groups(Vec<(String, usize)>),
}

/// Options controlling how a table is rendered.
///
/// Options whose values carry invariants (significance levels, digits,
/// column labels, covariate order) are only changed through the validating
/// setters; everything else is a plain field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub title: Option<String>,
    /// Italic banner spanning the model columns
    pub model_name: Option<String>,
    pub show_header: bool,
    pub show_footer: bool,
    pub show_model_numbers: bool,
    /// Standard errors (or intervals) beneath every estimate
    pub show_precision: bool,
    /// Significance stars on estimates and F-statistics
    pub show_sig: bool,
    /// Intervals instead of standard errors in precision rows
    pub confidence_intervals: bool,
    pub show_n: bool,
    pub show_r2: bool,
    pub show_adj_r2: bool,
    pub show_residual_std_err: bool,
    pub show_f_statistic: bool,
    /// Degrees of freedom after residual std. error and F-statistic
    pub show_dof: bool,
    pub show_notes: bool,
    pub notes_label: String,
    /// Put the significance legend on the label line
    pub notes_append: bool,
    pub custom_notes: Vec<String>,
    /// Display names keyed by covariate leaf
    pub rename: HashMap<String, String>,
    /// Escape user text for the target markup
    pub escape_text: bool,
    /// Argument of `\label{}` in the LaTeX float
    pub latex_label: String,
    significance_levels: SignificanceLevels,
    significant_digits: u32,
    column_labels: Option<ColumnLabels>,
    covariate_order: Option<Vec<CovariateKey>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: None,
            model_name: None,
            show_header: true,
            show_footer: true,
            show_model_numbers: true,
            show_precision: true,
            show_sig: true,
            confidence_intervals: false,
            show_n: true,
            show_r2: true,
            show_adj_r2: true,
            show_residual_std_err: false,
            show_f_statistic: true,
            show_dof: false,
            show_notes: true,
            notes_label: "Note:".to_string(),
            notes_append: true,
            custom_notes: Vec::new(),
            rename: HashMap::new(),
            escape_text: false,
            latex_label: String::new(),
            significance_levels: SignificanceLevels::default(),
            significant_digits: 3,
            column_labels: None,
            covariate_order: None,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coefficients and observations only
    pub fn minimal() -> Self {
        Self {
            show_model_numbers: false,
            show_r2: false,
            show_adj_r2: false,
            show_f_statistic: false,
            show_notes: false,
            ..Default::default()
        }
    }

    /// Every statistic, with degrees of freedom
    pub fn full() -> Self {
        Self {
            show_residual_std_err: true,
            show_dof: true,
            ..Default::default()
        }
    }

    pub fn significance_levels(&self) -> &SignificanceLevels {
        &self.significance_levels
    }

    pub fn significant_digits(&self) -> u32 {
        self.significant_digits
    }

    pub fn column_labels(&self) -> Option<&ColumnLabels> {
        self.column_labels.as_ref()
    }

    pub fn covariate_order(&self) -> Option<&[CovariateKey]> {
        self.covariate_order.as_deref()
    }

    /// Display name of a covariate, falling back to its leaf
    pub fn display_name<'a>(&'a self, key: &'a CovariateKey) -> &'a str {
        let leaf = key.leaf();
        self.rename.get(leaf).map(String::as_str).unwrap_or(leaf)
    }

    pub fn set_significance_levels(&mut self, levels: SignificanceLevels) {
        self.significance_levels = levels;
    }

    pub fn set_significant_digits(&mut self, digits: u32) -> Result<()> {
        if digits > MAX_SIGNIFICANT_DIGITS {
            return Err(StargazerError::validation(
                "significant_digits",
                format!("{} exceeds the maximum of {}", digits, MAX_SIGNIFICANT_DIGITS),
            ));
        }
        self.significant_digits = digits;
        Ok(())
    }

    /// Set grouped column labels; spans must cover exactly `num_models`.
    pub fn set_column_groups(
        &mut self,
        labels: Vec<String>,
        spans: Vec<usize>,
        num_models: usize,
    ) -> Result<()> {
        if labels.len() != spans.len() {
            return Err(StargazerError::validation(
                "custom_columns",
                format!("{} labels but {} column spans", labels.len(), spans.len()),
            ));
        }
        if spans.iter().any(|s| *s == 0) {
            return Err(StargazerError::validation(
                "custom_columns",
                "every label must span at least one column",
            ));
        }
        let total: usize = spans.iter().sum();
        if total != num_models {
            return Err(StargazerError::validation(
                "custom_columns",
                format!("spans cover {} columns but there are {} models", total, num_models),
            ));
        }
        self.column_labels = Some(ColumnLabels::Groups(labels.into_iter().zip(spans).collect()));
        Ok(())
    }

    pub fn set_column_label(&mut self, label: impl Into<String>) {
        self.column_labels = Some(ColumnLabels::Single(label.into()));
    }

    /// Store an already validated covariate order
    pub(crate) fn set_covariate_order(&mut self, order: Option<Vec<CovariateKey>>) {
        self.covariate_order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert!(config.show_header);
        assert!(!config.show_residual_std_err);
        assert!(!config.show_dof);
        assert_eq!(config.notes_label, "Note:");
        assert_eq!(config.significant_digits(), 3);
        assert_eq!(config.significance_levels().len(), 4);
        assert!(config.column_labels().is_none());
    }

    #[test]
    fn test_presets() {
        let minimal = RenderConfig::minimal();
        assert!(!minimal.show_notes);
        assert!(minimal.show_n);

        let full = RenderConfig::full();
        assert!(full.show_dof);
        assert!(full.show_residual_std_err);
    }

    #[test]
    fn test_digits_validation() {
        let mut config = RenderConfig::default();
        assert!(config.set_significant_digits(9).is_ok());
        assert!(config.set_significant_digits(10).is_err());
        assert_eq!(config.significant_digits(), 9);
    }

    #[test]
    fn test_column_groups_validation() {
        let mut config = RenderConfig::default();
        config
            .set_column_groups(vec!["A".into(), "B".into()], vec![1, 2], 3)
            .unwrap();

        let before = config.column_labels().cloned();
        assert!(config
            .set_column_groups(vec!["A".into()], vec![2], 3)
            .is_err());
        assert!(config
            .set_column_groups(vec!["A".into(), "B".into()], vec![3], 3)
            .is_err());
        assert!(config
            .set_column_groups(vec!["A".into(), "B".into()], vec![0, 3], 3)
            .is_err());
        assert_eq!(config.column_labels().cloned(), before);
    }

    #[test]
    fn test_display_name() {
        let mut config = RenderConfig::default();
        config.rename.insert("x".into(), "Education".into());
        assert_eq!(config.display_name(&CovariateKey::new("x")), "Education");
        assert_eq!(config.display_name(&CovariateKey::from(("g", "x"))), "Education");
        assert_eq!(config.display_name(&CovariateKey::new("z")), "z");
    }

    #[test]
    fn test_levels_deserialize_validates() {
        let levels: std::result::Result<SignificanceLevels, _> =
            serde_json::from_str("[0.01, 0.1]");
        assert_eq!(levels.unwrap().descending(), &[0.1, 0.01]);
        let bad: std::result::Result<SignificanceLevels, _> = serde_json::from_str("[1.5]");
        assert!(bad.is_err());
    }
}
