use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use super::{CaseConfig, CaseError, CasePaths, StreamlineSetConfig, SurfaceConfig, VolumeConfig};
use crate::component::{BinaryArray, ComponentError, ComponentStats, ComponentWriter, Domain};
use crate::mesh::vtk;
use crate::streamline::{self, CollectionSummary, StreamlineError};

/// Result of converting one streamline table
#[derive(Debug, Clone)]
pub struct StreamlineSetReport {
    /// Written JSON document
    pub output: PathBuf,
    /// Extents of the written collection
    pub summary: CollectionSummary,
}

/// Everything written for one case
#[derive(Debug, Clone)]
pub struct CaseReport {
    /// Case name
    pub case: String,
    /// Surface and volume components
    pub components: Vec<ComponentStats>,
    /// Streamline sets
    pub streamlines: Vec<StreamlineSetReport>,
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Case {}", self.case)?;
        for component in &self.components {
            writeln!(f, "  {}", component)?;
        }
        for set in &self.streamlines {
            writeln!(f, "  {}: {}", set.output.display(), set.summary)?;
        }
        Ok(())
    }
}

/// Convert every case listed in the configuration, or `cases` when given.
///
/// Cases are independent; the first failure aborts the run.
pub fn convert_all(config: &CaseConfig, cases: &[String]) -> Result<Vec<CaseReport>, CaseError> {
    let cases = if cases.is_empty() { &config.cases[..] } else { cases };
    if cases.is_empty() {
        return Err(CaseError::NoCase);
    }
    cases.iter().map(|case| convert_case(config, case)).collect()
}

/// Convert one case directory
pub fn convert_case(config: &CaseConfig, case: &str) -> Result<CaseReport, CaseError> {
    let paths = CasePaths::from_config(config, case);
    info!("Converting case {}", case);

    let mut report = CaseReport {
        case: case.to_string(),
        components: Vec::new(),
        streamlines: Vec::new(),
    };

    for surface in &config.surfaces {
        report.components.push(convert_surface(&paths, surface)?);
    }
    for volume in &config.volumes {
        report.components.push(convert_volume(&paths, volume)?);
    }
    for set in &config.streamlines {
        report.streamlines.push(convert_streamline_set(&paths, set)?);
    }

    if report.components.is_empty() && report.streamlines.is_empty() {
        warn!("Case {}: configuration lists nothing to convert", case);
    }

    Ok(report)
}

fn convert_surface(paths: &CasePaths, surface: &SurfaceConfig) -> Result<ComponentStats, CaseError> {
    let source = paths.input(&surface.source);
    let mut mesh = vtk::load_surface(&source, &surface.scalar).map_err(|error| CaseError::MeshError {
        source_file: source.display().to_string(),
        error,
    })?;
    info!("Surface {}: {}", surface.component, mesh);

    if surface.reverse_winding {
        mesh.reverse_winding();
    }

    let key = surface.array_key();
    let component_error = |error: ComponentError| CaseError::ComponentError {
        component: surface.component.clone(),
        error,
    };
    let domain = Domain::of_surface(&mesh, &key).map_err(component_error)?;

    writer(paths, &surface.component)
        .write(&surface.label, Some(domain), &BinaryArray::surface(&mesh, &key))
        .map_err(component_error)
}

fn convert_volume(paths: &CasePaths, volume: &VolumeConfig) -> Result<ComponentStats, CaseError> {
    let source = paths.input(&volume.source);
    let grid = vtk::load_raw_grid(&source, &volume.scalar).map_err(|error| CaseError::MeshError {
        source_file: source.display().to_string(),
        error,
    })?;
    info!(
        "Volume {}: {} points, {} connectivity entries",
        volume.component,
        grid.point_count(),
        grid.connectivity.len()
    );

    let key = volume.array_key();
    let component_error = |error: ComponentError| CaseError::ComponentError {
        component: volume.component.clone(),
        error,
    };
    let domain = Domain::of_grid(&grid, &key).map_err(component_error)?;

    writer(paths, &volume.component)
        .write(&volume.label, Some(domain), &BinaryArray::grid(&grid, &key))
        .map_err(component_error)
}

fn convert_streamline_set(
    paths: &CasePaths,
    set: &StreamlineSetConfig,
) -> Result<StreamlineSetReport, CaseError> {
    let source = paths.input(&set.source);
    let output = paths.output(&set.output);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    let streamline_error = |error: StreamlineError| CaseError::StreamlineError {
        source_file: source.display().to_string(),
        error,
    };
    let summary = streamline::convert_streamlines(&source, &output, &set.schema(), set.options())
        .map_err(streamline_error)?;
    info!("Streamlines {}: {}", output.display(), summary);

    if set.write_summary {
        let summary_path = output.with_extension("summary.json");
        summary
            .write_json_file(&summary_path)
            .map_err(streamline_error)?;
    }

    Ok(StreamlineSetReport { output, summary })
}

fn writer(paths: &CasePaths, component: &str) -> ComponentWriter {
    ComponentWriter::new(
        component,
        paths.component_dir(component),
        paths.component_url(component),
    )
}
