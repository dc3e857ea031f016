//! Error types for intent-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntentError {
    /// A built-in pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// The third-party classifier or extractor failed.
    #[error("Remote service error: {0}")]
    Remote(String),
}

pub type Result<T> = std::result::Result<T, IntentError>;
