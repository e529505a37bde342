use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
