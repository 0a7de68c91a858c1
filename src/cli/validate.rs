use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use aerovis::validator::validate_streamline_file;

/// Validate a streamline JSON document; exits with status 1 on failure
pub fn run(file: PathBuf, continuity_tolerance: Option<f64>) -> Result<()> {
    info!("Validating {}", file.display());
    if let Some(tolerance) = continuity_tolerance {
        info!("Continuity tolerance: {}", tolerance);
    }

    let report = validate_streamline_file(&file, continuity_tolerance)
        .with_context(|| format!("Failed to open {}", file.display()))?;

    println!("{}", report.format_colored());

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
