//! Error types for the QueryKit crate
//!
//! Compilation itself never fails; these cover configuration, identifier
//! validation and malformed JSON input at the edges.

use thiserror::Error;

use filter_compiler::{CompilerError, ValidationError};

#[derive(Error, Debug)]
pub enum QueryKitError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Input error: {0}")]
    Input(#[from] CompilerError),
}
