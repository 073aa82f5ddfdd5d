//! Release descriptor and observed-state types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A caller's declaration of a desired release
///
/// The name is the identity key; chart name, chart version, and namespace
/// pin what gets deployed where. The override payload is opaque YAML or
/// JSON text layered onto the chart's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSpec {
    /// Release name
    pub name: String,

    /// Chart the release deploys
    pub chart_name: String,

    /// Chart version pin
    pub chart_version: String,

    /// Target Kubernetes namespace
    pub namespace: String,

    /// Override payload (YAML or JSON text)
    #[serde(default)]
    pub overrides: String,
}

impl ReleaseSpec {
    /// Structural checks, run before every operation that mutates live state
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(CoreError::validation("release name is unset"));
        }
        if self.chart_name.is_empty() {
            return Err(CoreError::validation(format!(
                "chart name is unset for release '{}'",
                self.name
            )));
        }
        if self.chart_version.is_empty() {
            return Err(CoreError::validation(format!(
                "chart version is unset for release '{}'",
                self.name
            )));
        }
        if self.namespace.is_empty() {
            return Err(CoreError::validation(format!(
                "namespace is unset for release '{}'",
                self.name
            )));
        }
        Ok(())
    }
}

/// One read of a release's live state, parsed from a listing row
///
/// Derived fresh on every query and discarded after the calling operation
/// consumes it; nothing here is ever cached.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedRelease {
    /// Release name
    pub name: String,

    /// Revision number
    pub revision: u32,

    /// When the release last changed, in the process's local timezone
    pub last_updated: DateTime<Local>,

    /// Status reported by the tool
    pub status: ReleaseStatus,

    /// Chart name, split out of the composite chart column
    pub chart_name: String,

    /// Chart version, split out of the composite chart column
    pub chart_version: String,

    /// Namespace the release lives in
    pub namespace: String,
}

/// Release status as reported by helm v2
///
/// Only `Deployed` counts as success and only `Deleted` counts as absent;
/// every other status is present but unsuccessful. Strings the tool may
/// grow that we don't know about land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseStatus {
    Unknown,
    Deployed,
    Deleted,
    Superseded,
    Failed,
    Deleting,
    PendingInstall,
    PendingUpgrade,
    PendingRollback,
    Other(String),
}

impl ReleaseStatus {
    /// Classify a STATUS column value
    pub fn parse(value: &str) -> Self {
        match value {
            "UNKNOWN" => Self::Unknown,
            "DEPLOYED" => Self::Deployed,
            "DELETED" => Self::Deleted,
            "SUPERSEDED" => Self::Superseded,
            "FAILED" => Self::Failed,
            "DELETING" => Self::Deleting,
            "PENDING_INSTALL" => Self::PendingInstall,
            "PENDING_UPGRADE" => Self::PendingUpgrade,
            "PENDING_ROLLBACK" => Self::PendingRollback,
            other => Self::Other(other.to_string()),
        }
    }

    /// The success sentinel
    pub fn is_deployed(&self) -> bool {
        matches!(self, Self::Deployed)
    }

    /// The terminal "resource absent" sentinel
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unknown => "UNKNOWN",
            Self::Deployed => "DEPLOYED",
            Self::Deleted => "DELETED",
            Self::Superseded => "SUPERSEDED",
            Self::Failed => "FAILED",
            Self::Deleting => "DELETING",
            Self::PendingInstall => "PENDING_INSTALL",
            Self::PendingUpgrade => "PENDING_UPGRADE",
            Self::PendingRollback => "PENDING_ROLLBACK",
            Self::Other(other) => other,
        };
        write!(f, "{}", s)
    }
}
