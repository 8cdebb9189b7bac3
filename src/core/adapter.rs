//! Conversion of model inputs into canonical [`ModelSummary`] records
//!
//! Three input shapes are accepted, each an explicit [`ModelInput`] variant:
//!
//! - [`ModelInput::Results`]: an already-extracted coefficient table plus a
//!   mapping of named summary scalars
//! - [`ModelInput::Mapping`]: a JSON object with `params` and `info` entries
//! - [`ModelInput::Fitted`]: a fitted regression exposing the usual
//!   statsmodels-style accessors through [`FittedRegression`]
//!
//! Structural problems are reported as [`StargazerError::TypeConversion`]
//! naming the model's position in the input list.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::model::{defined, CoefficientRecord, CovariateKey, ModelStatistics, ModelSummary};
use crate::utils::error::{Result, StargazerError};

/// Info key names understood by the adapter
pub mod info_keys {
    pub const RSQUARED: &str = "rsquared";
    pub const RSQUARED_ADJ: &str = "rsquared_adj";
    pub const SCALE: &str = "scale";
    pub const FVALUE: &str = "fvalue";
    pub const F_PVALUE: &str = "f_pvalue";
    pub const DF_MODEL: &str = "df_model";
    pub const DF_RESID: &str = "df_resid";
    pub const N_OBS: &str = "n_obs";
    pub const DEPENDENT_VARIABLE: &str = "dependent_variable";
}

/// A named summary scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Number(f64),
    Text(String),
    Missing,
}

impl From<f64> for InfoValue {
    fn from(v: f64) -> Self {
        InfoValue::Number(v)
    }
}

impl From<&str> for InfoValue {
    fn from(v: &str) -> Self {
        InfoValue::Text(v.to_string())
    }
}

impl From<String> for InfoValue {
    fn from(v: String) -> Self {
        InfoValue::Text(v)
    }
}

impl From<Option<f64>> for InfoValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(InfoValue::Missing, InfoValue::Number)
    }
}

/// Coefficient table plus named summary scalars
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResults {
    pub params: IndexMap<CovariateKey, CoefficientRecord>,
    pub info: BTreeMap<String, InfoValue>,
}

impl ModelResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a coefficient row
    pub fn with_param(mut self, key: impl Into<CovariateKey>, record: CoefficientRecord) -> Self {
        self.params.insert(key.into(), record);
        self
    }

    /// Builder: add a summary scalar
    pub fn with_info(mut self, name: impl Into<String>, value: impl Into<InfoValue>) -> Self {
        self.info.insert(name.into(), value.into());
        self
    }
}

/// A fitted linear regression exposing statsmodels-like accessors.
///
/// The coefficient accessors are parallel: element `i` of every vector
/// belongs to `param_names()[i]`. Scalars default to undefined.
pub trait FittedRegression {
    fn param_names(&self) -> Vec<CovariateKey>;
    fn params(&self) -> Vec<f64>;
    fn pvalues(&self) -> Vec<f64>;
    /// Standard errors of the estimates
    fn bse(&self) -> Vec<f64>;
    /// Confidence interval bounds as `(lower, upper)`
    fn conf_int(&self) -> Vec<(f64, f64)>;

    fn rsquared(&self) -> Option<f64> {
        None
    }
    fn rsquared_adj(&self) -> Option<f64> {
        None
    }
    fn scale(&self) -> Option<f64> {
        None
    }
    fn fvalue(&self) -> Option<f64> {
        None
    }
    fn f_pvalue(&self) -> Option<f64> {
        None
    }
    fn df_model(&self) -> Option<f64> {
        None
    }
    fn df_resid(&self) -> Option<f64> {
        None
    }
    fn nobs(&self) -> Option<f64> {
        None
    }
    /// Name of the dependent (endogenous) variable
    fn endog_name(&self) -> Option<String> {
        None
    }
}

/// One model in any of the accepted input shapes
pub enum ModelInput {
    /// Coefficient table plus named summary scalars
    Results(ModelResults),
    /// JSON object with `params` and `info` entries
    Mapping(Value),
    /// Fitted regression object
    Fitted(Box<dyn FittedRegression>),
}

impl std::fmt::Debug for ModelInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelInput::Results(r) => f.debug_tuple("Results").field(r).finish(),
            ModelInput::Mapping(v) => f.debug_tuple("Mapping").field(v).finish(),
            ModelInput::Fitted(_) => f.write_str("Fitted(..)"),
        }
    }
}

impl From<ModelResults> for ModelInput {
    fn from(results: ModelResults) -> Self {
        ModelInput::Results(results)
    }
}

impl From<Value> for ModelInput {
    fn from(value: Value) -> Self {
        ModelInput::Mapping(value)
    }
}

impl From<Box<dyn FittedRegression>> for ModelInput {
    fn from(model: Box<dyn FittedRegression>) -> Self {
        ModelInput::Fitted(model)
    }
}

impl ModelInput {
    /// Wrap a fitted regression
    pub fn fitted(model: impl FittedRegression + 'static) -> Self {
        ModelInput::Fitted(Box::new(model))
    }

    /// Short name of the shape, for diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            ModelInput::Results(_) => "results",
            ModelInput::Mapping(_) => "mapping",
            ModelInput::Fitted(_) => "fitted",
        }
    }

    /// Convert into the canonical record.
    ///
    /// `position` is the model's index in the input list and only appears in
    /// error messages.
    pub fn into_summary(self, position: usize) -> Result<ModelSummary> {
        match self {
            ModelInput::Results(results) => from_results(results, position),
            ModelInput::Mapping(value) => from_mapping(value, position),
            ModelInput::Fitted(model) => from_fitted(model.as_ref(), position),
        }
    }
}

fn from_results(results: ModelResults, position: usize) -> Result<ModelSummary> {
    let coefficients = results
        .params
        .into_iter()
        .map(|(key, rec)| (key, sanitize(rec)))
        .collect();
    let statistics = statistics_from_info(&results.info, position)?;
    Ok(ModelSummary::new(coefficients, statistics))
}

fn from_mapping(value: Value, position: usize) -> Result<ModelSummary> {
    let Value::Object(mut map) = value else {
        return Err(StargazerError::conversion(
            position,
            "expected an object with 'params' and 'info' entries",
        ));
    };
    let params = map
        .remove("params")
        .ok_or_else(|| StargazerError::conversion(position, "missing 'params' entry"))?;
    let info = map
        .remove("info")
        .ok_or_else(|| StargazerError::conversion(position, "missing 'info' entry"))?;

    let coefficients = params_from_json(params, position)?;
    let info = info_from_json(info, position)?;
    let statistics = statistics_from_info(&info, position)?;
    Ok(ModelSummary::new(coefficients, statistics))
}

fn from_fitted(model: &dyn FittedRegression, position: usize) -> Result<ModelSummary> {
    let names = model.param_names();
    let values = model.params();
    let pvalues = model.pvalues();
    let bse = model.bse();
    let conf_int = model.conf_int();

    let n = names.len();
    for (label, len) in [
        ("params", values.len()),
        ("pvalues", pvalues.len()),
        ("bse", bse.len()),
        ("conf_int", conf_int.len()),
    ] {
        if len != n {
            return Err(StargazerError::conversion(
                position,
                format!("'{}' has {} entries but there are {} parameters", label, len, n),
            ));
        }
    }

    let mut coefficients = IndexMap::with_capacity(n);
    for (i, key) in names.into_iter().enumerate() {
        let (lower, upper) = conf_int[i];
        let record = CoefficientRecord::new(values[i])
            .with_p_value(pvalues[i])
            .with_std_error(bse[i])
            .with_ci(lower, upper);
        if coefficients.insert(key.clone(), record).is_some() {
            return Err(StargazerError::conversion(
                position,
                format!("duplicate parameter '{}'", key),
            ));
        }
    }

    let statistics = ModelStatistics {
        n_obs: model.nobs().and_then(defined),
        r_squared: model.rsquared().and_then(defined),
        adj_r_squared: model.rsquared_adj().and_then(defined),
        scale: model.scale().and_then(defined),
        f_statistic: model.fvalue().and_then(defined),
        f_p_value: model.f_pvalue().and_then(defined),
        df_model: model.df_model().and_then(defined),
        df_resid: model.df_resid().and_then(defined),
        dependent_variable: model.endog_name(),
    };
    Ok(ModelSummary::new(coefficients, statistics))
}

/// Normalize NaN fields of a record to undefined
fn sanitize(rec: CoefficientRecord) -> CoefficientRecord {
    CoefficientRecord {
        value: rec.value,
        p_value: rec.p_value.and_then(defined),
        std_error: rec.std_error.and_then(defined),
        ci_lower: rec.ci_lower.and_then(defined),
        ci_upper: rec.ci_upper.and_then(defined),
    }
}

fn statistics_from_info(
    info: &BTreeMap<String, InfoValue>,
    position: usize,
) -> Result<ModelStatistics> {
    use info_keys::*;

    let number = |name: &'static str| -> Result<Option<f64>> {
        match info.get(name) {
            None | Some(InfoValue::Missing) => Ok(None),
            Some(InfoValue::Number(v)) => Ok(defined(*v)),
            Some(InfoValue::Text(t)) => Err(StargazerError::conversion(
                position,
                format!("info entry '{}' must be numeric, got \"{}\"", name, t),
            )),
        }
    };

    for name in info.keys() {
        if ![
            RSQUARED,
            RSQUARED_ADJ,
            SCALE,
            FVALUE,
            F_PVALUE,
            DF_MODEL,
            DF_RESID,
            N_OBS,
            DEPENDENT_VARIABLE,
        ]
        .contains(&name.as_str())
        {
            log::trace!("model {}: ignoring info entry '{}'", position, name);
        }
    }

    let dependent_variable = match info.get(DEPENDENT_VARIABLE) {
        Some(InfoValue::Text(t)) => Some(t.clone()),
        Some(InfoValue::Number(v)) => Some(v.to_string()),
        None | Some(InfoValue::Missing) => None,
    };

    Ok(ModelStatistics {
        n_obs: number(N_OBS)?,
        r_squared: number(RSQUARED)?,
        adj_r_squared: number(RSQUARED_ADJ)?,
        scale: number(SCALE)?,
        f_statistic: number(FVALUE)?,
        f_p_value: number(F_PVALUE)?,
        df_model: number(DF_MODEL)?,
        df_resid: number(DF_RESID)?,
        dependent_variable,
    })
}

fn params_from_json(
    params: Value,
    position: usize,
) -> Result<IndexMap<CovariateKey, CoefficientRecord>> {
    let mut coefficients = IndexMap::new();
    match params {
        Value::Object(map) => {
            for (name, entry) in map {
                let record = record_from_json(&entry, &name, position)?;
                coefficients.insert(CovariateKey::new(name), record);
            }
        }
        Value::Array(rows) => {
            for entry in rows {
                let key = match entry.get("covariate") {
                    Some(covariate) => key_from_json(covariate, position)?,
                    None => {
                        return Err(StargazerError::conversion(
                            position,
                            "every params record needs a 'covariate' entry",
                        ))
                    }
                };
                let record = record_from_json(&entry, &key.to_string(), position)?;
                if coefficients.insert(key.clone(), record).is_some() {
                    return Err(StargazerError::conversion(
                        position,
                        format!("duplicate covariate '{}'", key),
                    ));
                }
            }
        }
        _ => {
            return Err(StargazerError::conversion(
                position,
                "'params' must be an object or an array of records",
            ))
        }
    }
    Ok(coefficients)
}

fn key_from_json(value: &Value, position: usize) -> Result<CovariateKey> {
    match value {
        Value::String(name) => Ok(CovariateKey::new(name.clone())),
        Value::Array(parts) => {
            let segments = parts
                .iter()
                .map(|p| match p {
                    Value::String(s) => Ok(s.clone()),
                    Value::Number(n) => Ok(n.to_string()),
                    _ => Err(StargazerError::conversion(
                        position,
                        "covariate path segments must be strings",
                    )),
                })
                .collect::<Result<Vec<_>>>()?;
            CovariateKey::nested(segments).ok_or_else(|| {
                StargazerError::conversion(position, "covariate path must not be empty")
            })
        }
        _ => Err(StargazerError::conversion(
            position,
            "'covariate' must be a string or an array of strings",
        )),
    }
}

fn record_from_json(entry: &Value, name: &str, position: usize) -> Result<CoefficientRecord> {
    let Value::Object(fields) = entry else {
        return Err(StargazerError::conversion(
            position,
            format!("params entry '{}' must be an object", name),
        ));
    };

    let value = optional_number(fields, "value", name, position)?.ok_or_else(|| {
        StargazerError::conversion(position, format!("params entry '{}' has no 'value'", name))
    })?;

    Ok(CoefficientRecord {
        value,
        p_value: optional_number(fields, "pvalue", name, position)?,
        std_error: optional_number(fields, "standard_error", name, position)?,
        ci_lower: optional_number(fields, "ci_lower", name, position)?,
        ci_upper: optional_number(fields, "ci_upper", name, position)?,
    })
}

fn optional_number(
    fields: &Map<String, Value>,
    field: &str,
    name: &str,
    position: usize,
) -> Result<Option<f64>> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64().and_then(defined)),
        Some(other) => Err(StargazerError::conversion(
            position,
            format!("'{}' of '{}' must be a number, got {}", field, name, other),
        )),
    }
}

fn info_from_json(info: Value, position: usize) -> Result<BTreeMap<String, InfoValue>> {
    let Value::Object(map) = info else {
        return Err(StargazerError::conversion(position, "'info' must be an object"));
    };
    map.into_iter()
        .map(|(name, value)| {
            let value = match value {
                Value::Null => InfoValue::Missing,
                Value::Number(n) => n.as_f64().map_or(InfoValue::Missing, InfoValue::Number),
                Value::String(s) => InfoValue::Text(s),
                other => {
                    return Err(StargazerError::conversion(
                        position,
                        format!("info entry '{}' has unsupported value {}", name, other),
                    ))
                }
            };
            Ok((name, value))
        })
        .collect()
}
