//! The release reconciler
//!
//! [`HelmClient`] drives the helm CLI to converge live state to a declared
//! [`ReleaseSpec`]. It is stateless: every operation is self-contained,
//! blocks on its subprocess calls, and re-derives truth from `helm list`
//! instead of caching anything. Concurrent operations against the same
//! release name are the caller's problem to serialize.

use helmdrive_core::{ChartSource, HelmConfig, ObservedRelease, ReleaseSpec, overrides};

use crate::error::{ClientError, Result};
use crate::exec;
use crate::listing;

/// Stateless reconciler for helm releases
///
/// Connection and behavior options are validated once at construction and
/// immutable afterwards.
pub struct HelmClient {
    config: HelmConfig,
}

impl HelmClient {
    /// Validate `config` and build a client
    pub fn new(config: HelmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The options this client was built with
    pub fn config(&self) -> &HelmConfig {
        &self.config
    }

    /// Install or upgrade a release and confirm it reached DEPLOYED
    ///
    /// With a filesystem chart source, repository metadata and chart
    /// dependencies are refreshed first; either refresh failing aborts
    /// before any live-state mutation is attempted. helm's exit code is not
    /// trusted as proof of readiness under its async-wait semantics - the
    /// listing is re-queried and the status must read DEPLOYED.
    pub fn upgrade(&self, release: &ReleaseSpec) -> Result<()> {
        release.validate()?;

        if let ChartSource::Filesystem { root } = &self.config.chart_source {
            let mut repo_args = self.global_args();
            repo_args.extend(["repo", "update"].map(str::to_string));
            self.run_helm(&repo_args, None)?;

            let mut dep_args = self.global_args();
            dep_args.extend(["dependency", "update"].map(str::to_string));
            dep_args.push(root.join(&release.chart_name).display().to_string());
            self.run_helm(&dep_args, None)?;
        }

        let args = self.upgrade_args(release);
        let stdout = self.run_helm(&args, Some(&release.overrides))?;
        tracing::debug!(release = %release.name, output = %stdout, "helm upgrade finished");

        let observed = self.find_current(&release.name)?;
        if !observed.status.is_deployed() {
            return Err(ClientError::UnsuccessfulDeploy {
                name: release.name.clone(),
                status: observed.status.to_string(),
            });
        }
        Ok(())
    }

    /// Read current live state into `release`, including applied overrides
    ///
    /// A DELETED release reads as absent (`NotExist`) so the caller can
    /// clear its stored identity; any other non-DEPLOYED status is an
    /// unsuccessful deploy. The override payload is re-fetched from helm
    /// and stored in canonical form - normalization failure fails the read.
    pub fn read(&self, release: &mut ReleaseSpec) -> Result<()> {
        let observed = self.find_current(&release.name)?;
        if observed.status.is_deleted() {
            return Err(ClientError::NotExist {
                name: release.name.clone(),
            });
        }
        if !observed.status.is_deployed() {
            return Err(ClientError::UnsuccessfulDeploy {
                name: release.name.clone(),
                status: observed.status.to_string(),
            });
        }

        release.name = observed.name;
        release.chart_name = observed.chart_name;
        release.chart_version = observed.chart_version;
        release.namespace = observed.namespace;

        let mut args = self.behavioral_global_args();
        args.extend(["get".to_string(), "values".to_string(), release.name.clone()]);
        let stdout = self
            .run_helm(&args, None)
            .map_err(|source| ClientError::OverrideFetch {
                name: release.name.clone(),
                source: Box::new(source),
            })?;
        release.overrides = overrides::normalize(&stdout)?;
        Ok(())
    }

    /// Delete a release with purge semantics
    ///
    /// Success is solely the subprocess reporting success; no post-delete
    /// verification query is made.
    pub fn delete(&self, release: &ReleaseSpec) -> Result<()> {
        release.validate()?;

        let mut args = self.global_args();
        args.push("delete".to_string());
        if let Some(seconds) = self.config.timeout {
            args.push("--timeout".to_string());
            args.push(seconds.to_string());
        }
        args.push("--purge".to_string());
        args.push(release.name.clone());

        let stdout = self.run_helm(&args, None)?;
        tracing::debug!(release = %release.name, output = %stdout, "helm delete finished");
        Ok(())
    }

    /// One fresh read of live state for `name`
    ///
    /// Shared by upgrade confirmation and read. Uses `list -a` so releases
    /// in every status are visible.
    fn find_current(&self, name: &str) -> Result<ObservedRelease> {
        let mut args = self.behavioral_global_args();
        args.extend(["list", "-a"].map(str::to_string));
        let stdout = self.run_helm(&args, None)?;
        listing::find_release(&stdout, name)
    }

    fn run_helm(&self, args: &[String], input: Option<&str>) -> Result<String> {
        exec::run(self.config.helm_program(), args, input)
    }

    /// Global arguments that do not affect output format
    ///
    /// Invocations whose stdout gets parsed (`list`, `get values`) must use
    /// exactly this subset: reproducing `--debug` there would corrupt the
    /// tabular shape the parser depends on.
    fn behavioral_global_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(home) = &self.config.home {
            args.push("--home".to_string());
            args.push(home.display().to_string());
        }
        if let Some(host) = &self.config.host {
            args.push("--host".to_string());
            args.push(host.clone());
        }
        if let Some(context) = &self.config.kube_context {
            args.push("--kube-context".to_string());
            args.push(context.clone());
        }
        if let Some(kubeconfig) = &self.config.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(kubeconfig.display().to_string());
        }
        if let Some(seconds) = self.config.tiller_connection_timeout {
            args.push("--tiller-connection-timeout".to_string());
            args.push(seconds.to_string());
        }
        if let Some(namespace) = &self.config.tiller_namespace {
            args.push("--tiller-namespace".to_string());
            args.push(namespace.clone());
        }
        args
    }

    fn global_args(&self) -> Vec<String> {
        let mut args = self.behavioral_global_args();
        if self.config.debug {
            args.push("--debug".to_string());
        }
        args
    }

    fn upgrade_args(&self, release: &ReleaseSpec) -> Vec<String> {
        let mut args = self.global_args();
        args.extend(["upgrade", "--install", "--devel", "--wait", "-f", "-"].map(str::to_string));
        if let Some(seconds) = self.config.timeout {
            args.push("--timeout".to_string());
            args.push(seconds.to_string());
        }
        args.push("--version".to_string());
        args.push(release.chart_version.clone());
        args.push("--namespace".to_string());
        args.push(release.namespace.clone());
        args.push(release.name.clone());

        match &self.config.chart_source {
            ChartSource::Repository { url } => {
                args.push("--repo".to_string());
                args.push(url.clone());
                args.push(release.chart_name.clone());
            }
            ChartSource::Filesystem { root } => {
                args.push(root.join(&release.chart_name).display().to_string());
            }
        }
        args
    }
}
