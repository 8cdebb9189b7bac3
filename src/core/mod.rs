//! Core table engine
//!
//! This module contains the pipeline from model input to table rows:
//! - `model`: canonical per-model records
//! - `adapter`: conversion of the accepted input shapes
//! - `normalize`: union covariate index and significance stars
//! - `config`: display options
//! - `table`: abstract row model and its builder
//! - `stargazer`: the table instance tying everything together

pub mod adapter;
pub mod config;
pub mod model;
pub mod normalize;
pub mod stargazer;
pub mod table;

// Re-export main types
pub use adapter::{FittedRegression, InfoValue, ModelInput, ModelResults};
pub use config::{ColumnLabels, RenderConfig};
pub use model::{CoefficientRecord, CovariateKey, ModelStatistics, ModelSummary};
pub use normalize::{NormalizedData, SignificanceLevels, UnionCovariateIndex};
pub use stargazer::Stargazer;
pub use table::{TableBuilder, TableModel};
