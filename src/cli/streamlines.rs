use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use aerovis::streamline::{convert_streamlines, ReconstructOptions, SeedIdentity, TableSchema};

/// Reconstruct one streamline table
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    value_field: String,
    quantize: Option<u32>,
    max_lines: Option<usize>,
    continuity_tolerance: Option<f64>,
    write_summary: bool,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if max_lines == Some(0) {
        anyhow::bail!("--max-lines must be at least 1");
    }

    let output = output.unwrap_or_else(|| input.with_extension("json"));
    let seed_identity = quantize.map_or(SeedIdentity::Exact, SeedIdentity::Quantized);
    seed_identity.validate().context("Invalid --quantize")?;

    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Values: {}", value_field);
    info!("Seed identity: {}", seed_identity);

    let options = ReconstructOptions::default()
        .seed_identity(seed_identity)
        .max_lines(max_lines)
        .continuity_tolerance(continuity_tolerance);

    let summary = convert_streamlines(
        &input,
        &output,
        &TableSchema::with_value_field(value_field),
        options,
    )
    .with_context(|| format!("Failed to convert {}", input.display()))?;

    if write_summary {
        let summary_path = output.with_extension("summary.json");
        summary
            .write_json_file(&summary_path)
            .with_context(|| format!("Failed to write {}", summary_path.display()))?;
        info!("Summary: {}", summary_path.display());
    }

    println!("{}: {}", output.display(), summary);
    Ok(())
}
