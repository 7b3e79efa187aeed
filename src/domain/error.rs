//! Domain-level errors

use thiserror::Error;

/// Errors raised while building organizational units or their configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrgUnitError {
    #[error("invalid organizational unit format '{input}': {reason}")]
    InvalidFormat { input: String, reason: String },

    #[error("invalid organizational unit config: {message}")]
    InvalidConfig { message: String },
}

impl OrgUnitError {
    pub(crate) fn invalid_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result type for organizational unit operations.
pub type OrgUnitResult<T> = Result<T, OrgUnitError>;
