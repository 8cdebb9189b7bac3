//! Error handling for regtab
//!
//! This module provides a unified error type and result type for table
//! construction and configuration. Rendering itself never fails.

use thiserror::Error;

/// Error raised while building or configuring a regression table
#[derive(Debug, Error)]
pub enum StargazerError {
    /// A model input matched none of the accepted shapes, or was malformed
    #[error("model {model} does not have a valid format: {reason}")]
    TypeConversion { model: usize, reason: String },

    /// A configuration setter rejected its input
    #[error("invalid value for '{option}': {message}")]
    Validation {
        option: &'static str,
        message: String,
    },

    /// JSON text could not be parsed at all
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for table operations
pub type Result<T> = std::result::Result<T, StargazerError>;

// Convenience constructors for errors
impl StargazerError {
    pub fn conversion(model: usize, reason: impl Into<String>) -> Self {
        StargazerError::TypeConversion {
            model,
            reason: reason.into(),
        }
    }

    pub fn validation(option: &'static str, message: impl Into<String>) -> Self {
        StargazerError::Validation {
            option,
            message: message.into(),
        }
    }

    /// Whether this error came from a configuration setter
    pub fn is_validation(&self) -> bool {
        matches!(self, StargazerError::Validation { .. })
    }
}
