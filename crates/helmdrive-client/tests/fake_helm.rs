//! Integration tests driving HelmClient against a scripted fake helm
//!
//! Each test generates its own helm shell script in a scratch directory,
//! points the client at it via `helm_bin`, and asserts on the invocations
//! the script records. No real cluster or helm install is involved.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use helmdrive_client::{ClientError, HelmClient};
use helmdrive_core::{ChartSource, HelmConfig, ReleaseSpec};
use tempfile::TempDir;

const DEPLOYED_LISTING: &str = "NAME   \tREVISION\tUPDATED                 \tSTATUS  \tCHART              \tNAMESPACE\nmyapp  \t2       \tThu Jun  9 11:09:20 2022\tDEPLOYED\tnginx-ingress-1.2.3\tedge     \n";

struct FakeHelm {
    dir: TempDir,
}

impl FakeHelm {
    /// Lay down a fake helm script plus canned listing/values fixtures
    fn new(listing: &str, values: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("listing.txt"), listing).unwrap();
        fs::write(dir.path().join("values.yaml"), values).unwrap();

        let script = format!(
            r#"#!/bin/sh
dir="{dir}"
echo "$@" >> "$dir/invocations.log"
case "$*" in
  *"get values"*) cat "$dir/values.yaml" ;;
  *"repo update"*) : ;;
  *"dependency update"*) : ;;
  *upgrade*) cat - > "$dir/upgrade-stdin.txt"; echo "Release \"myapp\" has been upgraded." ;;
  *delete*) echo "release \"myapp\" deleted" ;;
  *list*) cat "$dir/listing.txt" ;;
esac
"#,
            dir = dir.path().display()
        );
        let bin = dir.path().join("helm");
        fs::write(&bin, script).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir }
    }

    fn bin(&self) -> PathBuf {
        self.dir.path().join("helm")
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn invocations(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("invocations.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn client_for(helm: &FakeHelm, config: HelmConfig) -> HelmClient {
    let config = HelmConfig {
        helm_bin: Some(helm.bin()),
        ..config
    };
    HelmClient::new(config).unwrap()
}

fn repo_config() -> HelmConfig {
    HelmConfig::new(ChartSource::Repository {
        url: "https://charts.example.com".to_string(),
    })
}

fn spec() -> ReleaseSpec {
    ReleaseSpec {
        name: "myapp".to_string(),
        chart_name: "nginx-ingress".to_string(),
        chart_version: "1.2.3".to_string(),
        namespace: "edge".to_string(),
        overrides: "replicas: 2\n".to_string(),
    }
}

#[test]
fn test_read_populates_descriptor_from_live_state() {
    let helm = FakeHelm::new(DEPLOYED_LISTING, "replicas: 2\nimage:\n  tag: v1\n");
    let client = client_for(&helm, repo_config());

    let mut release = ReleaseSpec {
        name: "myapp".to_string(),
        ..Default::default()
    };
    client.read(&mut release).unwrap();

    assert_eq!(release.chart_name, "nginx-ingress");
    assert_eq!(release.chart_version, "1.2.3");
    assert_eq!(release.namespace, "edge");
    // Overrides come back canonicalized, not verbatim.
    assert_eq!(release.overrides, r#"{"image":{"tag":"v1"},"replicas":2}"#);

    let invocations = helm.invocations();
    assert_eq!(invocations, vec!["list -a", "get values myapp"]);
}

#[test]
fn test_read_of_deleted_release_is_not_exist() {
    let listing = DEPLOYED_LISTING.replace("DEPLOYED", "DELETED ");
    let helm = FakeHelm::new(&listing, "");
    let client = client_for(&helm, repo_config());

    let mut release = ReleaseSpec {
        name: "myapp".to_string(),
        ..Default::default()
    };
    let err = client.read(&mut release).unwrap_err();
    assert!(err.is_not_exist());
}

#[test]
fn test_read_of_failed_release_is_unsuccessful_deploy() {
    let listing = DEPLOYED_LISTING.replace("DEPLOYED", "FAILED  ");
    let helm = FakeHelm::new(&listing, "");
    let client = client_for(&helm, repo_config());

    let mut release = ReleaseSpec {
        name: "myapp".to_string(),
        ..Default::default()
    };
    let err = client.read(&mut release).unwrap_err();
    assert!(err.is_unsuccessful_deploy());
    assert!(err.to_string().contains("FAILED"));
}

#[test]
fn test_read_of_empty_listing_is_not_exist() {
    let helm = FakeHelm::new("", "");
    let client = client_for(&helm, repo_config());

    let mut release = ReleaseSpec {
        name: "myapp".to_string(),
        ..Default::default()
    };
    assert!(client.read(&mut release).unwrap_err().is_not_exist());
}

#[test]
fn test_upgrade_sends_payload_and_confirms_deployed() {
    let helm = FakeHelm::new(DEPLOYED_LISTING, "");
    let config = HelmConfig {
        timeout: Some(300),
        ..repo_config()
    };
    let client = client_for(&helm, config);

    client.upgrade(&spec()).unwrap();

    // The override payload went through stdin untouched.
    let payload = fs::read_to_string(helm.path().join("upgrade-stdin.txt")).unwrap();
    assert_eq!(payload, "replicas: 2\n");

    let invocations = helm.invocations();
    assert_eq!(invocations.len(), 2);
    assert_eq!(
        invocations[0],
        "upgrade --install --devel --wait -f - --timeout 300 --version 1.2.3 --namespace edge myapp --repo https://charts.example.com nginx-ingress"
    );
    assert_eq!(invocations[1], "list -a");
}

#[test]
fn test_upgrade_then_read_round_trips_submitted_fields() {
    let helm = FakeHelm::new(DEPLOYED_LISTING, "replicas: 2\n");
    let client = client_for(&helm, repo_config());

    let submitted = spec();
    client.upgrade(&submitted).unwrap();

    let mut observed = ReleaseSpec {
        name: submitted.name.clone(),
        ..Default::default()
    };
    client.read(&mut observed).unwrap();

    assert_eq!(observed.chart_name, submitted.chart_name);
    assert_eq!(observed.chart_version, submitted.chart_version);
    assert_eq!(observed.namespace, submitted.namespace);
}

#[test]
fn test_upgrade_fails_when_status_is_not_deployed() {
    let listing = DEPLOYED_LISTING.replace("DEPLOYED", "FAILED  ");
    let helm = FakeHelm::new(&listing, "");
    let client = client_for(&helm, repo_config());

    let err = client.upgrade(&spec()).unwrap_err();
    assert!(err.is_unsuccessful_deploy());
}

#[test]
fn test_upgrade_refreshes_repo_and_dependencies_for_filesystem_source() {
    let helm = FakeHelm::new(DEPLOYED_LISTING, "");
    let charts = tempfile::tempdir().unwrap();
    let config = HelmConfig::new(ChartSource::Filesystem {
        root: charts.path().to_path_buf(),
    });
    let client = client_for(&helm, config);

    client.upgrade(&spec()).unwrap();

    let chart_dir = charts.path().join("nginx-ingress").display().to_string();
    let invocations = helm.invocations();
    assert_eq!(invocations.len(), 4);
    assert_eq!(invocations[0], "repo update");
    assert_eq!(invocations[1], format!("dependency update {chart_dir}"));
    assert!(invocations[2].starts_with("upgrade --install"));
    assert!(invocations[2].ends_with(&chart_dir));
    assert_eq!(invocations[3], "list -a");
}

#[test]
fn test_delete_purges_with_configured_timeout() {
    let helm = FakeHelm::new(DEPLOYED_LISTING, "");
    let config = HelmConfig {
        debug: true,
        timeout: Some(120),
        ..repo_config()
    };
    let client = client_for(&helm, config);

    client.delete(&spec()).unwrap();

    let invocations = helm.invocations();
    assert_eq!(invocations, vec!["--debug delete --timeout 120 --purge myapp"]);
}

#[test]
fn test_listing_invocations_never_carry_debug() {
    let helm = FakeHelm::new(DEPLOYED_LISTING, "{}\n");
    let config = HelmConfig {
        debug: true,
        tiller_namespace: Some("kube-system".to_string()),
        ..repo_config()
    };
    let client = client_for(&helm, config);

    let mut release = ReleaseSpec {
        name: "myapp".to_string(),
        ..Default::default()
    };
    client.read(&mut release).unwrap();

    let invocations = helm.invocations();
    assert_eq!(
        invocations,
        vec![
            "--tiller-namespace kube-system list -a",
            "--tiller-namespace kube-system get values myapp",
        ]
    );
}

#[test]
fn test_failing_helm_with_silent_stderr_still_names_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("helm");
    fs::write(&bin, "#!/bin/sh\nexit 7\n").unwrap();
    fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

    let config = HelmConfig {
        helm_bin: Some(bin),
        ..repo_config()
    };
    let client = HelmClient::new(config).unwrap();

    let mut release = ReleaseSpec {
        name: "myapp".to_string(),
        ..Default::default()
    };
    let err = client.read(&mut release).unwrap_err();
    match &err {
        ClientError::CommandFailed { command, stderr, .. } => {
            assert!(command.ends_with("helm list -a"));
            assert!(stderr.is_empty());
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert!(err.to_string().contains("list -a"));
}

#[test]
fn test_override_fetch_failure_is_wrapped_with_release_name() {
    // list works, get values does not.
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("listing.txt"), DEPLOYED_LISTING).unwrap();
    let script = format!(
        r#"#!/bin/sh
dir="{dir}"
case "$*" in
  *"get values"*) echo "values lookup exploded" >&2; exit 1 ;;
  *list*) cat "$dir/listing.txt" ;;
esac
"#,
        dir = dir.path().display()
    );
    let bin = dir.path().join("helm");
    fs::write(&bin, script).unwrap();
    fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

    let config = HelmConfig {
        helm_bin: Some(bin),
        ..repo_config()
    };
    let client = HelmClient::new(config).unwrap();

    let mut release = ReleaseSpec {
        name: "myapp".to_string(),
        ..Default::default()
    };
    let err = client.read(&mut release).unwrap_err();
    match &err {
        ClientError::OverrideFetch { name, source } => {
            assert_eq!(name, "myapp");
            assert!(source.to_string().contains("values lookup exploded"));
        }
        other => panic!("expected OverrideFetch, got {other:?}"),
    }
}
