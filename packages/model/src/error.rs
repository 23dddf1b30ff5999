use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while assembling type descriptors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown type name '{0}'")]
    UnknownType(String),

    #[error("Invalid identifier '{ident}': {reason}")]
    InvalidIdentifier { ident: String, reason: String },
}

impl ModelError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType(name.into())
    }

    pub fn invalid_identifier(ident: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            ident: ident.into(),
            reason: reason.into(),
        }
    }
}
