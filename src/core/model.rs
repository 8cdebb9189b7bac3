//! Canonical per-model records
//!
//! Every accepted input shape is converted into a [`ModelSummary`]: an ordered
//! coefficient table plus the scalar fit statistics. Missing statistics are
//! `None` and render as blank cells.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a coefficient row.
///
/// Flat names have a single segment; hierarchical keys carry the full group
/// path, e.g. `["region", "north"]`. Keys order segment by segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CovariateKey(Vec<String>);

impl CovariateKey {
    /// Create a flat (single-level) key
    pub fn new(name: impl Into<String>) -> Self {
        CovariateKey(vec![name.into()])
    }

    /// Create a hierarchical key from its group path.
    ///
    /// Returns `None` for an empty path.
    pub fn nested<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            None
        } else {
            Some(CovariateKey(segments))
        }
    }

    /// All segments, outermost group first
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of index levels
    pub fn levels(&self) -> usize {
        self.0.len()
    }

    /// The last segment, used as the row's display name
    pub fn leaf(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    pub fn is_hierarchical(&self) -> bool {
        self.0.len() > 1
    }
}

impl fmt::Display for CovariateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

impl From<&str> for CovariateKey {
    fn from(name: &str) -> Self {
        CovariateKey::new(name)
    }
}

impl From<String> for CovariateKey {
    fn from(name: String) -> Self {
        CovariateKey::new(name)
    }
}

impl<S: Into<String>> From<(S, S)> for CovariateKey {
    fn from((group, name): (S, S)) -> Self {
        CovariateKey(vec![group.into(), name.into()])
    }
}

/// Estimate and inference statistics for one coefficient
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoefficientRecord {
    /// Point estimate
    pub value: f64,
    pub p_value: Option<f64>,
    pub std_error: Option<f64>,
    /// Lower bound of the confidence interval
    pub ci_lower: Option<f64>,
    /// Upper bound of the confidence interval
    pub ci_upper: Option<f64>,
}

impl CoefficientRecord {
    /// Create a record with only the estimate set
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    /// Set p-value
    pub fn with_p_value(mut self, p: f64) -> Self {
        self.p_value = defined(p);
        self
    }

    /// Set standard error
    pub fn with_std_error(mut self, se: f64) -> Self {
        self.std_error = defined(se);
        self
    }

    /// Set confidence interval
    pub fn with_ci(mut self, lower: f64, upper: f64) -> Self {
        self.ci_lower = defined(lower);
        self.ci_upper = defined(upper);
        self
    }
}

/// Scalar fit statistics of a model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelStatistics {
    /// Number of observations, when reported directly
    pub n_obs: Option<f64>,
    pub r_squared: Option<f64>,
    pub adj_r_squared: Option<f64>,
    /// Residual variance (the square of the residual standard error)
    pub scale: Option<f64>,
    pub f_statistic: Option<f64>,
    pub f_p_value: Option<f64>,
    /// Numerator degrees of freedom
    pub df_model: Option<f64>,
    /// Denominator (residual) degrees of freedom
    pub df_resid: Option<f64>,
    pub dependent_variable: Option<String>,
}

impl ModelStatistics {
    /// Number of observations.
    ///
    /// Falls back to `df_model + df_resid + 1` when not reported.
    pub fn observations(&self) -> Option<f64> {
        self.n_obs
            .or_else(|| Some(self.df_model? + self.df_resid? + 1.0))
    }

    /// Residual standard error, the square root of the scale
    pub fn residual_std_error(&self) -> Option<f64> {
        self.scale.filter(|s| *s >= 0.0).map(f64::sqrt)
    }
}

/// Canonical record of one fitted model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Coefficients in the order the model reported them
    #[serde(with = "indexmap::map::serde_seq")]
    pub coefficients: IndexMap<CovariateKey, CoefficientRecord>,
    pub statistics: ModelStatistics,
}

impl ModelSummary {
    pub fn new(
        coefficients: IndexMap<CovariateKey, CoefficientRecord>,
        statistics: ModelStatistics,
    ) -> Self {
        Self {
            coefficients,
            statistics,
        }
    }

    pub fn coefficient(&self, key: &CovariateKey) -> Option<&CoefficientRecord> {
        self.coefficients.get(key)
    }

    pub fn contains(&self, key: &CovariateKey) -> bool {
        self.coefficients.contains_key(key)
    }
}

/// Map NaN and infinities to `None`
pub(crate) fn defined(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ordering_is_tuple_ordering() {
        let a = CovariateKey::from(("a", "z"));
        let b = CovariateKey::from(("b", "a"));
        let flat = CovariateKey::new("a");
        assert!(a < b);
        assert!(flat < a);
    }

    #[test]
    fn test_key_leaf_and_levels() {
        let key = CovariateKey::nested(["region", "north"]).unwrap();
        assert_eq!(key.leaf(), "north");
        assert_eq!(key.levels(), 2);
        assert!(key.is_hierarchical());
        assert_eq!(key.to_string(), "region:north");
        assert!(CovariateKey::nested(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_record_builder_drops_nan() {
        let rec = CoefficientRecord::new(1.5)
            .with_p_value(f64::NAN)
            .with_std_error(0.2);
        assert_eq!(rec.p_value, None);
        assert_eq!(rec.std_error, Some(0.2));
    }

    #[test]
    fn test_observations_fallback() {
        let stats = ModelStatistics {
            df_model: Some(3.0),
            df_resid: Some(96.0),
            ..Default::default()
        };
        assert_eq!(stats.observations(), Some(100.0));

        let reported = ModelStatistics {
            n_obs: Some(42.0),
            df_model: Some(3.0),
            df_resid: Some(96.0),
            ..Default::default()
        };
        assert_eq!(reported.observations(), Some(42.0));

        let partial = ModelStatistics {
            df_model: Some(3.0),
            ..Default::default()
        };
        assert_eq!(partial.observations(), None);
    }

    #[test]
    fn test_residual_std_error() {
        let stats = ModelStatistics {
            scale: Some(4.0),
            ..Default::default()
        };
        assert_eq!(stats.residual_std_error(), Some(2.0));
        assert_eq!(ModelStatistics::default().residual_std_error(), None);
    }
}
