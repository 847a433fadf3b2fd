//! Audit error types.

use thiserror::Error;

/// Errors that abort an audit call.
///
/// Almost nothing in the audit core is fatal: bad roster records,
/// ambiguous identity links, and unknown clans are collected as
/// [`AuditIssue`](crate::issue::AuditIssue) values and returned
/// alongside results. The variants here are the exceptions — problems
/// with the caller-supplied configuration or serialization that make
/// the run itself meaningless.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Invalid clan-family configuration.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuditError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;
