//! Error types for core value parsing and numeric utilities.

use std::error::Error;
use std::fmt;

/// Errors from core value construction and numeric utilities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// An argument was outside the accepted domain: a negative iteration
    /// count, an unknown heading name or arrow, an unknown direction name.
    InvalidArgument {
        /// Human-readable description of the rejected argument.
        reason: String,
    },
}

impl CoreError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
        }
    }
}

impl Error for CoreError {}
