//! Status command - show the observed state of a release

use console::style;

use helmdrive_client::HelmClient;
use helmdrive_core::{HelmConfig, ReleaseSpec};

use crate::error::{CliError, Result};

/// Run the status command
pub fn run(config: HelmConfig, name: &str, output_json: bool) -> Result<()> {
    let client = HelmClient::new(config)?;

    let mut release = ReleaseSpec {
        name: name.to_string(),
        ..Default::default()
    };
    client.read(&mut release)?;

    if output_json {
        let json = serde_json::to_string_pretty(&release)
            .map_err(|e| CliError::Client {
                message: e.to_string(),
            })?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", style("RELEASE").bold().underlined());
    println!("  Name:       {}", style(&release.name).cyan());
    println!("  Chart:      {}", release.chart_name);
    println!("  Version:    {}", release.chart_version);
    println!("  Namespace:  {}", style(&release.namespace).yellow());

    println!("\n{}", style("OVERRIDES").bold().underlined());
    println!("  {}", release.overrides);

    Ok(())
}
