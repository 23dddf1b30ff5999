use thiserror::Error;
use typecraft_model::ModelError;

/// Result of every synthesizer and validation step
pub type CommonResult<T> = Result<T, CommonError>;

/// Common error type shared by every synthesizer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Identifier must not be empty")]
    EmptyIdentifier,

    #[error("Invalid type descriptor '{name}': {}", .problems.join("; "))]
    InvalidDescriptor { name: String, problems: Vec<String> },

    #[error("Invalid hash constant {value}: expected a prime in [1, 23]")]
    InvalidSeed { value: i32 },

    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}
