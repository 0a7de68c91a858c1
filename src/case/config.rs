//! TOML case configuration.
//!
//! One file describes the components and streamline sets of a study; the
//! same description is applied to every case directory listed in `cases`:
//!
//! ```toml
//! cases = ["mach_0p5_re_1e5_aoa_15_sweep_60_2500steps"]
//!
//! [paths]
//! input_root = "assets/deltawing"
//! browser_root = "assets/deltawing"
//!
//! [[surface]]
//! component = "wing"
//! label = "Delta wing"
//! source = "wing.vtu"
//! scalar = "Mach"
//!
//! [[streamlines]]
//! source = "vortex_streamlines_5000.csv"
//! output = "streamlines/vortex.json"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use super::CaseError;
use crate::component::RESERVED_KEYS;
use crate::streamline::{ReconstructOptions, SeedIdentity, TableSchema};

/// Arrays every mesh component writes besides its scalar
const MESH_ARRAYS: [&str; 2] = ["vertices", "indices"];

fn default_scalar() -> String {
    "Mach".to_string()
}

fn default_true() -> bool {
    true
}

fn default_input_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_browser_root() -> String {
    "assets".to_string()
}

/// Root of a case configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseConfig {
    /// Where inputs are read from and outputs written to
    #[serde(default)]
    pub paths: PathsConfig,

    /// Case directory names to convert
    #[serde(default)]
    pub cases: Vec<String>,

    /// Triangulated surface components
    #[serde(default, rename = "surface")]
    pub surfaces: Vec<SurfaceConfig>,

    /// Volume components written with their raw connectivity
    #[serde(default, rename = "volume")]
    pub volumes: Vec<VolumeConfig>,

    /// Streamline tables to reconstruct
    #[serde(default)]
    pub streamlines: Vec<StreamlineSetConfig>,
}

/// Filesystem and browser roots
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory containing one sub-directory per case
    #[serde(default = "default_input_root")]
    pub input_root: PathBuf,

    /// Output directory; defaults to `input_root`
    pub output_root: Option<PathBuf>,

    /// URL prefix under which the renderer serves the output tree
    #[serde(default = "default_browser_root")]
    pub browser_root: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_root: default_input_root(),
            output_root: None,
            browser_root: default_browser_root(),
        }
    }
}

/// A surface mesh converted to triangles
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurfaceConfig {
    /// Output sub-directory name
    pub component: String,
    /// Display name written to `config.json`
    pub label: String,
    /// Mesh file, relative to the case directory
    pub source: PathBuf,
    /// Point data array holding the scalar field
    #[serde(default = "default_scalar")]
    pub scalar: String,
    /// Output array name; defaults to the lower-cased scalar name
    pub array_name: Option<String>,
    /// Flip triangle orientation
    #[serde(default = "default_true")]
    pub reverse_winding: bool,
}

impl SurfaceConfig {
    /// Name of the scalar array in the output
    pub fn array_key(&self) -> String {
        array_key(&self.array_name, &self.scalar)
    }
}

/// A volume mesh kept in its original cell layout
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeConfig {
    /// Output sub-directory name
    pub component: String,
    /// Display name written to `config.json`
    pub label: String,
    /// Mesh file, relative to the case directory
    pub source: PathBuf,
    /// Point data array holding the scalar field
    #[serde(default = "default_scalar")]
    pub scalar: String,
    /// Output array name; defaults to the lower-cased scalar name
    pub array_name: Option<String>,
}

impl VolumeConfig {
    /// Name of the scalar array in the output
    pub fn array_key(&self) -> String {
        array_key(&self.array_name, &self.scalar)
    }
}

fn array_key(array_name: &Option<String>, scalar: &str) -> String {
    array_name
        .clone()
        .unwrap_or_else(|| scalar.to_lowercase())
}

/// A streamline table and how to reconstruct it
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamlineSetConfig {
    /// CSV table, relative to the case directory
    pub source: PathBuf,
    /// JSON output, relative to the case output directory
    pub output: PathBuf,
    /// Column exported as `Values`
    #[serde(default = "default_scalar")]
    pub value_field: String,
    /// Seed matching strategy (`"exact"` or `{ quantized = N }`)
    #[serde(default)]
    pub seed_identity: SeedIdentity,
    /// Keep only the first N streamlines
    pub max_lines: Option<usize>,
    /// Warn about jumps larger than this distance
    pub continuity_tolerance: Option<f64>,
    /// Also write `<output>.summary.json`
    #[serde(default)]
    pub write_summary: bool,
}

impl StreamlineSetConfig {
    /// Column names of the table
    pub fn schema(&self) -> TableSchema {
        TableSchema::with_value_field(self.value_field.clone())
    }

    /// Reconstruction options
    pub fn options(&self) -> ReconstructOptions {
        ReconstructOptions::default()
            .seed_identity(self.seed_identity)
            .max_lines(self.max_lines)
            .continuity_tolerance(self.continuity_tolerance)
    }
}

impl CaseConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CaseError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Directory outputs are written under
    pub fn output_root(&self) -> &Path {
        self.paths
            .output_root
            .as_deref()
            .unwrap_or(&self.paths.input_root)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<(), CaseError> {
        let mut components: Vec<&str> = Vec::new();
        let names = self
            .surfaces
            .iter()
            .map(|s| s.component.as_str())
            .chain(self.volumes.iter().map(|v| v.component.as_str()));
        for name in names {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(CaseError::InvalidConfig(format!(
                    "invalid component name '{}'",
                    name
                )));
            }
            if components.contains(&name) {
                return Err(CaseError::InvalidConfig(format!(
                    "component '{}' is defined twice",
                    name
                )));
            }
            components.push(name);
        }

        let array_keys = self
            .surfaces
            .iter()
            .map(|s| (s.component.as_str(), s.array_key()))
            .chain(self.volumes.iter().map(|v| (v.component.as_str(), v.array_key())));
        for (component, key) in array_keys {
            if RESERVED_KEYS.contains(&key.as_str()) || MESH_ARRAYS.contains(&key.as_str()) {
                return Err(CaseError::InvalidConfig(format!(
                    "component '{}': array name '{}' is reserved",
                    component, key
                )));
            }
        }

        for set in &self.streamlines {
            set.seed_identity.validate().map_err(|e| {
                CaseError::InvalidConfig(format!("{}: {}", set.source.display(), e))
            })?;
            if matches!(set.continuity_tolerance, Some(t) if !(t > 0.0)) {
                return Err(CaseError::InvalidConfig(format!(
                    "{}: continuity_tolerance must be positive",
                    set.source.display()
                )));
            }
            if set.max_lines == Some(0) {
                return Err(CaseError::InvalidConfig(format!(
                    "{}: max_lines must be at least 1",
                    set.source.display()
                )));
            }
        }

        Ok(())
    }
}

impl FromStr for CaseConfig {
    type Err = CaseError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: CaseConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}
