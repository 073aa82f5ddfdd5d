//! Client error types

use std::process::ExitStatus;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from driving the helm CLI
///
/// `NotExist` and `UnsuccessfulDeploy` are sentinels callers branch on;
/// match the variant (or use the predicates below), never the message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The listing succeeded but the named release is absent or DELETED
    #[error("release '{name}' not found")]
    NotExist { name: String },

    /// The operation finished without a transport error, but the release
    /// is not DEPLOYED
    #[error("release '{name}' did not reach DEPLOYED status (tool reported {status})")]
    UnsuccessfulDeploy { name: String, status: String },

    /// The helm binary could not be started at all
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// helm exited non-zero
    #[error("`{}` exited with {}{}", .command, .status, stderr_detail(.stderr))]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// A listing row did not have the expected six tab-separated fields
    #[error("malformed listing row (expected 6 fields, got {found}): `{line}`")]
    MalformedRow { found: usize, line: String },

    /// The REVISION column did not parse as a non-negative integer
    #[error("couldn't read revision for release '{name}': `{value}`")]
    InvalidRevision { name: String, value: String },

    /// The UPDATED column did not match helm's timestamp format
    #[error("couldn't read updated time for release '{name}': `{value}`")]
    InvalidTimestamp { name: String, value: String },

    /// The CHART column did not split into chart name and version
    #[error("couldn't parse chart name from version in release '{name}': `{value}`")]
    InvalidChart { name: String, value: String },

    /// Retrieving the currently-applied override values failed
    #[error("couldn't read overrides for release '{name}': {source}")]
    OverrideFetch {
        name: String,
        source: Box<ClientError>,
    },

    /// Descriptor/configuration validation or payload normalization failure
    #[error(transparent)]
    Core(#[from] helmdrive_core::CoreError),
}

// Keep blank-detail messages honest: an empty stderr buffer adds nothing.
fn stderr_detail(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr.trim_end())
    }
}

impl ClientError {
    /// True when the release is simply absent; callers treat this as
    /// "clear stored identity", not as a hard failure
    pub fn is_not_exist(&self) -> bool {
        matches!(self, ClientError::NotExist { .. })
    }

    /// True when live state exists but is not successfully deployed
    pub fn is_unsuccessful_deploy(&self) -> bool {
        matches!(self, ClientError::UnsuccessfulDeploy { .. })
    }
}
