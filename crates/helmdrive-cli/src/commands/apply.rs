//! Apply command - install or upgrade a release

use console::style;
use std::path::Path;

use helmdrive_client::HelmClient;
use helmdrive_core::{HelmConfig, ReleaseSpec};

use crate::commands::read_payload;
use crate::error::Result;

/// Run the apply command
pub fn run(
    config: HelmConfig,
    name: &str,
    chart: &str,
    chart_version: &str,
    namespace: &str,
    values: Option<&Path>,
) -> Result<()> {
    let overrides = read_payload(values)?;

    let release = ReleaseSpec {
        name: name.to_string(),
        chart_name: chart.to_string(),
        chart_version: chart_version.to_string(),
        namespace: namespace.to_string(),
        overrides,
    };

    let client = HelmClient::new(config)?;
    client.upgrade(&release)?;

    println!(
        "{} release {} ({}-{}) deployed to {}",
        style("✓").green(),
        style(name).cyan(),
        chart,
        chart_version,
        style(namespace).yellow()
    );
    Ok(())
}
