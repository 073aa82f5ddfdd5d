//! CLI error types with exit code handling
//!
//! Maps library errors onto a small set of user-facing categories, each
//! with its own exit code.

use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;
use helmdrive_client::ClientError;
use helmdrive_core::CoreError;

/// Result type for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Descriptor or configuration failed structural checks
    #[error("{message}")]
    #[diagnostic(code(helmdrive::cli::validation))]
    Validation { message: String },

    /// The release does not exist
    #[error("release '{name}' not found")]
    #[diagnostic(code(helmdrive::cli::not_found))]
    NotFound { name: String },

    /// The release exists but is not successfully deployed
    #[error("{message}")]
    #[diagnostic(code(helmdrive::cli::deploy))]
    DeployFailed { message: String },

    /// The override payload could not be canonicalized
    #[error("{message}")]
    #[diagnostic(code(helmdrive::cli::normalize))]
    Normalize { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(helmdrive::cli::io))]
    Io { message: String },

    /// Any other reconciliation failure
    #[error("{message}")]
    #[diagnostic(code(helmdrive::cli::client))]
    Client { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::DeployFailed { .. } => exit_codes::DEPLOY_ERROR,
            CliError::Normalize { .. } => exit_codes::NORMALIZE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Client { .. } => exit_codes::ERROR,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(err: &std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::Validation { message },
            other => CliError::Normalize {
                message: other.to_string(),
            },
        }
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotExist { name } => CliError::NotFound { name },
            ClientError::UnsuccessfulDeploy { name, status } => CliError::DeployFailed {
                message: format!(
                    "release '{name}' did not reach DEPLOYED status (tool reported {status})"
                ),
            },
            ClientError::Core(core) => CliError::from(core),
            other => CliError::Client {
                message: other.to_string(),
            },
        }
    }
}
