//! The regression table instance
//!
//! A [`Stargazer`] owns its converted models, the data derived from them and
//! one [`RenderConfig`]. Setters change a single option and leave everything
//! untouched when they fail; rendering takes `&self` and can be repeated.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::adapter::ModelInput;
use super::config::RenderConfig;
use super::model::{CovariateKey, ModelSummary};
use super::normalize::{NormalizedData, SignificanceLevels};
use super::table::{TableBuilder, TableModel};
use crate::render::{to_html, to_latex, LatexMode};
use crate::utils::error::{Result, StargazerError};

/// Side-by-side summary table of one or more regression models
#[derive(Debug, Clone)]
pub struct Stargazer {
    data: NormalizedData,
    config: RenderConfig,
}

impl Stargazer {
    /// Convert and merge the given models.
    ///
    /// Fails without building anything if a single model is malformed, if no
    /// models are given, or if covariate keys differ in depth.
    pub fn new<I>(models: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<ModelInput>,
    {
        let summaries = models
            .into_iter()
            .enumerate()
            .map(|(position, model)| {
                let input: ModelInput = model.into();
                log::trace!("converting model {} from {} input", position, input.shape());
                input.into_summary(position)
            })
            .collect::<Result<Vec<ModelSummary>>>()?;

        let config = RenderConfig::default();
        let data = NormalizedData::new(summaries, config.significance_levels())?;
        log::debug!(
            "created table for {} models and {} covariates",
            data.num_models(),
            data.index().len()
        );
        Ok(Stargazer { data, config })
    }

    /// Table for a single model
    pub fn from_model(model: impl Into<ModelInput>) -> Result<Self> {
        Self::new(std::iter::once(model))
    }

    /// Parse JSON holding one model mapping or an array of them
    pub fn from_json_str(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Array(models) => Self::new(models),
            single => Self::from_model(single),
        }
    }

    pub fn num_models(&self) -> usize {
        self.data.num_models()
    }

    pub fn models(&self) -> &[ModelSummary] {
        self.data.models()
    }

    pub fn data(&self) -> &NormalizedData {
        &self.data
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Covariate keys in current row order
    pub fn covariates(&self) -> Vec<&CovariateKey> {
        match self.config.covariate_order() {
            Some(order) => order.iter().collect(),
            None => self.data.index().keys().collect(),
        }
    }

    // ------------------------------------------------------------------
    // Text options
    // ------------------------------------------------------------------

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.config.title = Some(title.into());
        self
    }

    /// Italic banner spanning every model column
    pub fn model_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.config.model_name = Some(name.into());
        self
    }

    /// Label groups above the models; `spans` must add up to the model count
    pub fn custom_columns<S: Into<String>>(
        &mut self,
        labels: impl IntoIterator<Item = S>,
        spans: impl IntoIterator<Item = usize>,
    ) -> Result<&mut Self> {
        let num_models = self.num_models();
        self.config.set_column_groups(
            labels.into_iter().map(Into::into).collect(),
            spans.into_iter().collect(),
            num_models,
        )?;
        Ok(self)
    }

    /// One label spanning every model
    pub fn custom_column_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.config.set_column_label(label);
        self
    }

    /// Display names keyed by covariate leaf
    pub fn rename_covariates<K, V>(&mut self, names: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.config.rename = names
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<HashMap<_, _>>();
        self
    }

    pub fn custom_note_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.config.notes_label = label.into();
        self
    }

    /// Replace the custom notes below the table
    pub fn add_custom_notes<S: Into<String>>(
        &mut self,
        notes: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.config.custom_notes = notes.into_iter().map(Into::into).collect();
        self
    }

    pub fn latex_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.config.latex_label = label.into();
        self
    }

    // ------------------------------------------------------------------
    // Toggles
    // ------------------------------------------------------------------

    pub fn show_header(&mut self, show: bool) -> &mut Self {
        self.config.show_header = show;
        self
    }

    pub fn show_footer(&mut self, show: bool) -> &mut Self {
        self.config.show_footer = show;
        self
    }

    pub fn show_model_numbers(&mut self, show: bool) -> &mut Self {
        self.config.show_model_numbers = show;
        self
    }

    pub fn show_precision(&mut self, show: bool) -> &mut Self {
        self.config.show_precision = show;
        self
    }

    /// Significance stars on estimates and the F-statistic
    pub fn show_sig(&mut self, show: bool) -> &mut Self {
        self.config.show_sig = show;
        self
    }

    /// Alias of [`Stargazer::show_sig`]
    pub fn show_stars(&mut self, show: bool) -> &mut Self {
        self.show_sig(show)
    }

    pub fn show_confidence_intervals(&mut self, show: bool) -> &mut Self {
        self.config.confidence_intervals = show;
        self
    }

    pub fn show_n(&mut self, show: bool) -> &mut Self {
        self.config.show_n = show;
        self
    }

    pub fn show_r2(&mut self, show: bool) -> &mut Self {
        self.config.show_r2 = show;
        self
    }

    pub fn show_adj_r2(&mut self, show: bool) -> &mut Self {
        self.config.show_adj_r2 = show;
        self
    }

    pub fn show_residual_std_err(&mut self, show: bool) -> &mut Self {
        self.config.show_residual_std_err = show;
        self
    }

    pub fn show_f_statistic(&mut self, show: bool) -> &mut Self {
        self.config.show_f_statistic = show;
        self
    }

    pub fn show_degrees_of_freedom(&mut self, show: bool) -> &mut Self {
        self.config.show_dof = show;
        self
    }

    pub fn show_notes(&mut self, show: bool) -> &mut Self {
        self.config.show_notes = show;
        self
    }

    /// Keep the significance legend on the note label line
    pub fn append_notes(&mut self, append: bool) -> &mut Self {
        self.config.notes_append = append;
        self
    }

    /// Escape user-supplied text for the target markup
    pub fn escape_text(&mut self, escape: bool) -> &mut Self {
        self.config.escape_text = escape;
        self
    }

    // ------------------------------------------------------------------
    // Validated options
    // ------------------------------------------------------------------

    /// Replace the p-value cutoffs and recompute every star
    pub fn significance_levels(
        &mut self,
        levels: impl IntoIterator<Item = f64>,
    ) -> Result<&mut Self> {
        let levels = SignificanceLevels::new(levels)?;
        self.data.recompute_stars(&levels);
        self.config.set_significance_levels(levels);
        Ok(self)
    }

    /// Decimals shown for every number, at most 9
    pub fn significant_digits(&mut self, digits: u32) -> Result<&mut Self> {
        self.config.set_significant_digits(digits)?;
        Ok(self)
    }

    /// Show only these covariates, in this order
    pub fn covariate_order<K: Into<CovariateKey>>(
        &mut self,
        keys: impl IntoIterator<Item = K>,
    ) -> Result<&mut Self> {
        let keys: Vec<CovariateKey> = keys.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(keys.len());
        for key in &keys {
            if !self.data.index().contains(key) {
                return Err(StargazerError::validation(
                    "covariate_order",
                    format!("'{}' is not a covariate of any model", key),
                ));
            }
            if !seen.insert(key) {
                return Err(StargazerError::validation(
                    "covariate_order",
                    format!("'{}' is listed more than once", key),
                ));
            }
        }
        self.config.set_covariate_order(Some(keys));
        Ok(self)
    }

    /// Back to the sorted union of all covariates
    pub fn reset_covariate_order(&mut self) -> &mut Self {
        self.config.set_covariate_order(None);
        self
    }

    /// Restore every display option to its default
    pub fn reset_params(&mut self) -> &mut Self {
        let defaults = RenderConfig::default();
        if defaults.significance_levels() != self.config.significance_levels() {
            self.data.recompute_stars(defaults.significance_levels());
        }
        self.config = defaults;
        self
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Abstract rows and rules for the current options
    pub fn table_model(&self) -> TableModel {
        TableBuilder::new(&self.data, &self.config).build()
    }

    pub fn render_html(&self) -> String {
        log::debug!("rendering HTML table");
        to_html(&self.table_model(), &self.config)
    }

    /// LaTeX inside a `table` float
    pub fn render_latex(&self) -> String {
        self.render_latex_with(LatexMode::Float)
    }

    pub fn render_latex_with(&self, mode: LatexMode) -> String {
        log::debug!("rendering LaTeX table ({:?})", mode);
        to_latex(&self.table_model(), &self.config, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::adapter::ModelResults;
    use crate::core::model::CoefficientRecord;

    fn two_models() -> Stargazer {
        let a = ModelResults::new()
            .with_param("const", CoefficientRecord::new(1.0).with_p_value(0.001))
            .with_param("x", CoefficientRecord::new(0.5).with_p_value(0.04));
        let b = ModelResults::new()
            .with_param("const", CoefficientRecord::new(0.8).with_p_value(0.2))
            .with_param("z", CoefficientRecord::new(-0.1).with_p_value(0.5));
        Stargazer::new(vec![a, b]).unwrap()
    }

    fn names(sg: &Stargazer) -> Vec<String> {
        sg.covariates().iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_new_merges_covariates() {
        let sg = two_models();
        assert_eq!(sg.num_models(), 2);
        assert_eq!(names(&sg), vec!["const", "x", "z"]);
    }

    #[test]
    fn test_new_rejects_empty_list() {
        let err = Stargazer::new(Vec::<ModelResults>::new()).unwrap_err();
        assert!(matches!(err, StargazerError::TypeConversion { .. }));
    }

    #[test]
    fn test_covariate_order_validation() {
        let mut sg = two_models();
        assert!(sg.covariate_order(["x", "w"]).is_err());
        assert!(sg.covariate_order(["x", "x"]).is_err());
        assert_eq!(names(&sg), vec!["const", "x", "z"]);

        sg.covariate_order(["z", "const"]).unwrap();
        assert_eq!(names(&sg), vec!["z", "const"]);
        sg.reset_covariate_order();
        assert_eq!(names(&sg), vec!["const", "x", "z"]);
    }

    #[test]
    fn test_failed_levels_keep_stars() {
        let mut sg = two_models();
        let x = CovariateKey::new("x");
        assert_eq!(sg.data().stars(0).unwrap().coefficient(&x), 2);

        assert!(sg.significance_levels([0.5, 2.0]).is_err());
        assert_eq!(sg.data().stars(0).unwrap().coefficient(&x), 2);
        assert_eq!(sg.config().significance_levels().len(), 4);

        sg.significance_levels([0.05]).unwrap();
        assert_eq!(sg.data().stars(0).unwrap().coefficient(&x), 1);
    }

    #[test]
    fn test_reset_params_restores_defaults() {
        let mut sg = two_models();
        sg.title("T")
            .show_n(false)
            .significance_levels([0.5])
            .unwrap()
            .covariate_order(["x"])
            .unwrap();
        sg.reset_params();
        assert_eq!(sg.config(), &RenderConfig::default());
        assert_eq!(names(&sg), vec!["const", "x", "z"]);
        let x = CovariateKey::new("x");
        assert_eq!(sg.data().stars(0).unwrap().coefficient(&x), 2);
    }

    #[test]
    fn test_show_sig_and_alias() {
        let mut sg = two_models();
        sg.show_sig(false);
        assert!(!sg.config().show_sig);
        sg.show_stars(true);
        assert!(sg.config().show_sig);
    }

    #[test]
    fn test_from_json_str() {
        let sg = Stargazer::from_json_str(
            r#"{"params": {"x": {"value": 1.0}}, "info": {"n_obs": 10}}"#,
        )
        .unwrap();
        assert_eq!(sg.num_models(), 1);

        let err = Stargazer::from_json_str("not json").unwrap_err();
        assert!(matches!(err, StargazerError::Json(_)));
    }

    #[test]
    fn test_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Stargazer>();
    }
}
