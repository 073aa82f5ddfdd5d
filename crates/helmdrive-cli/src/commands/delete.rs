//! Delete command - purge a release

use console::style;

use helmdrive_client::HelmClient;
use helmdrive_core::{HelmConfig, ReleaseSpec};

use crate::error::Result;

/// Run the delete command
pub fn run(
    config: HelmConfig,
    name: &str,
    chart: &str,
    chart_version: &str,
    namespace: &str,
) -> Result<()> {
    let release = ReleaseSpec {
        name: name.to_string(),
        chart_name: chart.to_string(),
        chart_version: chart_version.to_string(),
        namespace: namespace.to_string(),
        overrides: String::new(),
    };

    let client = HelmClient::new(config)?;
    client.delete(&release)?;

    println!("{} release {} deleted", style("✓").green(), style(name).cyan());
    Ok(())
}
