//! Merging of per-model records into the shared row structure
//!
//! [`NormalizedData`] is built once from the converted models. It holds the
//! union covariate index (sorted, deduplicated), the collapsed first-column
//! labels for hierarchical keys, and the significance stars of every
//! coefficient and F-statistic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::model::{CovariateKey, ModelSummary};
use crate::utils::error::{Result, StargazerError};

/// Default p-value cutoffs
pub const DEFAULT_SIGNIFICANCE_LEVELS: [f64; 4] = [0.1, 0.05, 0.03, 0.01];

/// P-value cutoffs, stored in descending order.
///
/// Every level is finite, strictly between 0 and 1, and unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct SignificanceLevels(Vec<f64>);

impl SignificanceLevels {
    pub fn new(levels: impl IntoIterator<Item = f64>) -> Result<Self> {
        let mut levels: Vec<f64> = levels.into_iter().collect();
        if levels.is_empty() {
            return Err(StargazerError::validation(
                "significance_levels",
                "at least one level is required",
            ));
        }
        if let Some(bad) = levels
            .iter()
            .find(|l| !l.is_finite() || **l <= 0.0 || **l >= 1.0)
        {
            return Err(StargazerError::validation(
                "significance_levels",
                format!("{} is not strictly between 0 and 1", bad),
            ));
        }
        levels.sort_by(|a, b| b.total_cmp(a));
        if levels.windows(2).any(|w| w[0] == w[1]) {
            return Err(StargazerError::validation(
                "significance_levels",
                "levels must not repeat",
            ));
        }
        Ok(SignificanceLevels(levels))
    }

    /// Levels from loosest to strictest
    pub fn descending(&self) -> &[f64] {
        &self.0
    }

    /// Levels from strictest to loosest, the order the legend lists them
    pub fn ascending(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of stars earned by a p-value.
    ///
    /// The ascending levels act as right-closed bin edges over `(-1, 2]`, so
    /// this is the count of levels `t` with `p <= t`. Undefined or
    /// out-of-range p-values earn nothing.
    pub fn stars(&self, p_value: Option<f64>) -> usize {
        match p_value {
            Some(p) if p > -1.0 && p <= 2.0 => self.0.iter().filter(|t| p <= **t).count(),
            _ => 0,
        }
    }
}

impl Default for SignificanceLevels {
    fn default() -> Self {
        SignificanceLevels(DEFAULT_SIGNIFICANCE_LEVELS.to_vec())
    }
}

impl TryFrom<Vec<f64>> for SignificanceLevels {
    type Error = StargazerError;

    fn try_from(levels: Vec<f64>) -> Result<Self> {
        SignificanceLevels::new(levels)
    }
}

impl From<SignificanceLevels> for Vec<f64> {
    fn from(levels: SignificanceLevels) -> Self {
        levels.0
    }
}

/// Sorted set of every covariate key across all models
#[derive(Debug, Clone, PartialEq)]
pub struct UnionCovariateIndex {
    /// Key to first-column labels, in canonical row order
    rows: IndexMap<CovariateKey, Vec<String>>,
    levels: usize,
}

impl UnionCovariateIndex {
    fn build(models: &[ModelSummary]) -> Result<Self> {
        let mut levels = None;
        for (position, model) in models.iter().enumerate() {
            for key in model.coefficients.keys() {
                match levels {
                    None => levels = Some(key.levels()),
                    Some(n) if n != key.levels() => {
                        return Err(StargazerError::conversion(
                            position,
                            format!(
                                "covariate '{}' has {} index levels, expected {}",
                                key,
                                key.levels(),
                                n
                            ),
                        ))
                    }
                    Some(_) => {}
                }
            }
        }

        let keys: BTreeSet<&CovariateKey> = models
            .iter()
            .flat_map(|m| m.coefficients.keys())
            .collect();

        let mut rows = IndexMap::with_capacity(keys.len());
        let mut previous: Option<&CovariateKey> = None;
        for key in keys {
            let labels = key
                .segments()
                .iter()
                .enumerate()
                .map(|(i, segment)| match previous {
                    Some(prev) if prev.segments()[i] == *segment => String::new(),
                    _ => segment.clone(),
                })
                .collect();
            rows.insert(key.clone(), labels);
            previous = Some(key);
        }

        Ok(UnionCovariateIndex {
            rows,
            levels: levels.unwrap_or(1),
        })
    }

    /// Keys in canonical order
    pub fn keys(&self) -> impl Iterator<Item = &CovariateKey> {
        self.rows.keys()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &CovariateKey) -> bool {
        self.rows.contains_key(key)
    }

    /// Number of index levels shared by every key
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Collapsed first-column labels of a key, one per level.
    ///
    /// A label is blank when the same level of the preceding key in
    /// canonical order holds the same value.
    pub fn first_column(&self, key: &CovariateKey) -> Option<&[String]> {
        self.rows.get(key).map(Vec::as_slice)
    }
}

/// Stars of one model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelStars {
    pub coefficients: HashMap<CovariateKey, usize>,
    pub f_statistic: usize,
}

impl ModelStars {
    pub fn coefficient(&self, key: &CovariateKey) -> usize {
        self.coefficients.get(key).copied().unwrap_or(0)
    }
}

/// Models plus everything derived from them
#[derive(Debug, Clone)]
pub struct NormalizedData {
    models: Vec<ModelSummary>,
    index: UnionCovariateIndex,
    stars: Vec<ModelStars>,
}

impl NormalizedData {
    /// Build the union index and star annotations.
    ///
    /// Fails on an empty model list and on keys with differing depth.
    pub fn new(models: Vec<ModelSummary>, levels: &SignificanceLevels) -> Result<Self> {
        if models.is_empty() {
            return Err(StargazerError::conversion(0, "no models were supplied"));
        }
        for (position, model) in models.iter().enumerate() {
            if model.coefficients.is_empty() {
                log::warn!("model {} has no coefficients", position);
            }
        }

        let index = UnionCovariateIndex::build(&models)?;
        let stars = compute_stars(&models, levels);
        log::debug!(
            "normalized {} models into {} covariate rows ({} levels)",
            models.len(),
            index.len(),
            index.levels()
        );

        Ok(NormalizedData {
            models,
            index,
            stars,
        })
    }

    /// Replace every star annotation for new thresholds
    pub fn recompute_stars(&mut self, levels: &SignificanceLevels) {
        log::trace!("recomputing stars for levels {:?}", levels.descending());
        self.stars = compute_stars(&self.models, levels);
    }

    pub fn models(&self) -> &[ModelSummary] {
        &self.models
    }

    pub fn num_models(&self) -> usize {
        self.models.len()
    }

    pub fn index(&self) -> &UnionCovariateIndex {
        &self.index
    }

    pub fn stars(&self, model: usize) -> Option<&ModelStars> {
        self.stars.get(model)
    }
}

fn compute_stars(models: &[ModelSummary], levels: &SignificanceLevels) -> Vec<ModelStars> {
    models
        .iter()
        .map(|model| ModelStars {
            coefficients: model
                .coefficients
                .iter()
                .map(|(key, rec)| (key.clone(), levels.stars(rec.p_value)))
                .collect(),
            f_statistic: levels.stars(model.statistics.f_p_value),
        })
        .collect()
}
