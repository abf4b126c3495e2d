use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("`{raw}` is not a valid recipe id")]
    InvalidId { raw: String },
    #[error("domain validation failed: {message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn invalid_id(raw: impl Into<String>) -> Self {
        Self::InvalidId { raw: raw.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
