use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use aerovis::case::{convert_all, CaseConfig};

/// Convert the cases of a configuration file
pub fn run(config_path: PathBuf, cases: Vec<String>) -> Result<()> {
    if !config_path.exists() {
        anyhow::bail!("Config file does not exist: {}", config_path.display());
    }

    let config = CaseConfig::from_file(&config_path)
        .with_context(|| format!("Failed to load config file: {}", config_path.display()))?;

    info!("aerovis - ParaView exports to renderer assets");
    info!("=============================================");
    info!("Config: {}", config_path.display());
    info!("Input root:  {}", config.paths.input_root.display());
    info!("Output root: {}", config.output_root().display());
    info!(
        "Components: {} surface, {} volume; {} streamline sets",
        config.surfaces.len(),
        config.volumes.len(),
        config.streamlines.len()
    );

    let reports = convert_all(&config, &cases).context("Conversion failed")?;

    for report in &reports {
        print!("{}", report);
    }
    info!("Converted {} cases", reports.len());

    Ok(())
}
