//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{message}")]
    Validation { message: String },

    #[error("override payload is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to render canonical JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
