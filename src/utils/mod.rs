//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - Number formatting for table cells
//! - Markup escaping

pub mod error;
pub mod escape;
pub mod format;

// Re-export commonly used items
pub use error::{Result, StargazerError};
pub use escape::{escape_html, escape_latex};
pub use format::{format_count, format_level, format_number, format_value, round_to};
