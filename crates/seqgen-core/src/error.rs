//! Error types for seqgen-core

use thiserror::Error;

/// Core error type
///
/// Stepping a generator never fails. These errors only come out of the
/// opt-in validation layer (`GeneratorConfig::validate`,
/// `SequenceGenerator::try_new`, `SequenceGenerator::checked_range`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("Invalid range: first index {first} is past last index {last}")]
    InvalidRange { first: usize, last: usize },
}

impl Error {
    /// Create an InvalidConfiguration error
    pub fn invalid_configuration(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
