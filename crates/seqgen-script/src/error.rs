//! Error types for seqgen-script

use thiserror::Error;

/// Definition loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Unknown generator: {0}")]
    UnknownGenerator(String),

    #[error("Generator error: {0}")]
    Core(#[from] seqgen_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
