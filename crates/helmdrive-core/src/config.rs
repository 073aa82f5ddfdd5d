//! Connection and behavior options for the helm CLI

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Where charts referenced by a release are looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSource {
    /// A chart repository; charts are resolved by name against `url`
    Repository { url: String },

    /// A local directory holding one chart directory per chart name
    Filesystem { root: PathBuf },
}

impl ChartSource {
    /// Build a chart source from its string-typed kind and location
    ///
    /// `kind` must be exactly `repository` or `filesystem`; anything else
    /// is rejected before a client is ever constructed.
    pub fn new(kind: &str, location: impl Into<String>) -> Result<Self> {
        match kind {
            "repository" => Ok(Self::Repository {
                url: location.into(),
            }),
            "filesystem" => Ok(Self::Filesystem {
                root: PathBuf::from(location.into()),
            }),
            other => Err(CoreError::validation(format!(
                "chart source kind must be `repository` or `filesystem`, got `{}`",
                other
            ))),
        }
    }
}

/// Options for every helm invocation made by a client
///
/// Immutable once a client is built. Settings left as `None` are simply
/// omitted from the command line, preserving helm's own defaulting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmConfig {
    /// Pass `--debug` to helm on mutating invocations
    pub debug: bool,

    /// Helm config home (`--home`), overriding $HELM_HOME
    pub home: Option<PathBuf>,

    /// Tiller address (`--host`), overriding $HELM_HOST
    pub host: Option<String>,

    /// Kube context to use (`--kube-context`)
    pub kube_context: Option<String>,

    /// Path to the kubeconfig file (`--kubeconfig`)
    pub kubeconfig: Option<PathBuf>,

    /// Seconds helm waits to establish a tiller connection
    pub tiller_connection_timeout: Option<u64>,

    /// Namespace tiller runs in (`--tiller-namespace`)
    pub tiller_namespace: Option<String>,

    /// Seconds to wait for any individual Kubernetes operation
    pub timeout: Option<u64>,

    /// Where charts are found
    pub chart_source: ChartSource,

    /// Helm binary to invoke; `None` resolves `helm` from PATH
    pub helm_bin: Option<PathBuf>,
}

impl Default for HelmConfig {
    fn default() -> Self {
        Self {
            debug: false,
            home: None,
            host: None,
            kube_context: None,
            kubeconfig: None,
            tiller_connection_timeout: None,
            tiller_namespace: None,
            timeout: None,
            chart_source: ChartSource::Repository { url: String::new() },
            helm_bin: None,
        }
    }
}

impl HelmConfig {
    /// Create a configuration with the given chart source
    pub fn new(chart_source: ChartSource) -> Self {
        Self {
            chart_source,
            ..Default::default()
        }
    }

    /// Structural checks, run once when a client is constructed
    pub fn validate(&self) -> Result<()> {
        if let ChartSource::Filesystem { root } = &self.chart_source {
            if !root.is_dir() {
                return Err(CoreError::validation(format!(
                    "chart source must be an existing directory: {}",
                    root.display()
                )));
            }
        }
        Ok(())
    }

    /// The helm binary this configuration invokes
    pub fn helm_program(&self) -> &Path {
        self.helm_bin.as_deref().unwrap_or(Path::new("helm"))
    }
}
