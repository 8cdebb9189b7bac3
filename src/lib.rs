//! # regtab
//!
//! Publication-style regression tables in HTML and LaTeX.
//!
//! ## Features
//!
//! - **Side by side**: any number of models aligned on the union of their covariates
//! - **Two encodings**: HTML and LaTeX rendered from the same row model
//! - **Significance stars**: configurable p-value cutoffs, recomputed on change
//! - **Hierarchical covariates**: grouped keys with collapsed group labels
//! - **Three input shapes**: extracted tables, JSON mappings, fitted models
//!
//! ## Usage Examples
//!
//! ### Building a Table
//!
//! ```rust
//! use regtab::{CoefficientRecord, ModelResults, Stargazer};
//!
//! let ols = ModelResults::new()
//!     .with_param("const", CoefficientRecord::new(1.2).with_p_value(0.001).with_std_error(0.3))
//!     .with_param("educ", CoefficientRecord::new(0.54).with_p_value(0.02).with_std_error(0.2))
//!     .with_info("rsquared", 0.31)
//!     .with_info("n_obs", 500.0);
//!
//! let mut table = Stargazer::from_model(ols).unwrap();
//! table.title("Wage regression").significant_digits(2).unwrap();
//!
//! let html = table.render_html();
//! assert!(html.contains("<td>0.54<sup>***</sup></td>"));
//!
//! let latex = table.render_latex();
//! assert!(latex.contains(r"\caption{Wage regression}"));
//! ```
//!
//! ### From JSON
//!
//! ```rust
//! let json = r#"[
//!     {"params": {"x": {"value": 0.5, "pvalue": 0.2}}, "info": {"rsquared": 0.1}},
//!     {"params": {"x": {"value": 0.7, "pvalue": 0.004}}, "info": {"rsquared": 0.4}}
//! ]"#;
//!
//! let latex = regtab::json_to_latex(json).unwrap();
//! assert!(latex.contains("0.7$^{****}$"));
//! ```

/// Core table engine
pub mod core;

/// Output encodings
pub mod render;

/// Utility modules
pub mod utils;

// Re-export the table engine
pub use core::adapter::{FittedRegression, InfoValue, ModelInput, ModelResults};
pub use core::config::{ColumnLabels, RenderConfig};
pub use core::model::{CoefficientRecord, CovariateKey, ModelStatistics, ModelSummary};
pub use core::normalize::{SignificanceLevels, DEFAULT_SIGNIFICANCE_LEVELS};
pub use core::stargazer::Stargazer;
pub use core::table::{RowKind, TableModel};

// Re-export renderers
pub use render::{to_html, to_latex, LatexMode};

// Re-export utilities
pub use utils::error::{Result, StargazerError};

/// Render models as an HTML table with default options
pub fn render_html<I>(models: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: Into<ModelInput>,
{
    Ok(Stargazer::new(models)?.render_html())
}

/// Render models as a LaTeX table float with default options
pub fn render_latex<I>(models: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: Into<ModelInput>,
{
    Ok(Stargazer::new(models)?.render_latex())
}

/// Render JSON model mappings as HTML
///
/// Accepts a single mapping or an array of them.
pub fn json_to_html(input: &str) -> Result<String> {
    Ok(Stargazer::from_json_str(input)?.render_html())
}

/// Render JSON model mappings as LaTeX
pub fn json_to_latex(input: &str) -> Result<String> {
    Ok(Stargazer::from_json_str(input)?.render_latex())
}
