//! Renderer components
//!
//! A component is one drawable object (the wing surface, a volume block) made
//! of a `config.json` record and one binary file per numeric array:
//!
//! ```json
//! {
//! "name": "Delta wing",
//! "domain": {
//! "x": [0.0, 1.0],
//! "y": [-0.5, 0.5],
//! "z": [0.0, 0.1],
//! "mach": [0.3, 0.9]
//! },
//! "vertices": "./assets/deltawing/<case>/wing/vertices.bin",
//! "indices": "./assets/deltawing/<case>/wing/indices.bin",
//! "mach": "./assets/deltawing/<case>/wing/mach.bin"
//! }
//! ```
//!
//! Array paths are the URLs the browser fetches, not filesystem paths.

mod error;

#[cfg(test)]
mod tests;

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::binary::{self, ElementType, NumericArray};
use crate::mesh::{value_range, Axis, RawGrid, SurfaceMesh};

pub use error::ComponentError;

/// File name of a component's configuration record
pub const CONFIG_FILE_NAME: &str = "config.json";

/// `config.json` keys that array names must not shadow
pub const RESERVED_KEYS: [&str; 2] = ["name", "domain"];

/// Ordered `[min, max]` extents keyed by axis or field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domain {
    entries: Vec<(String, [f64; 2])>,
}

impl Domain {
    /// Empty domain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an extent
    pub fn with(mut self, key: impl Into<String>, range: [f64; 2]) -> Self {
        self.entries.push((key.into(), range));
        self
    }

    /// Append the extent of `values`, failing when there are none or any is
    /// NaN or infinite
    pub fn with_values<I>(self, key: impl Into<String>, values: I) -> Result<Self, ComponentError>
    where
        I: IntoIterator<Item = f64>,
    {
        let key = key.into();
        match value_range(values) {
            Some([lo, hi]) if lo.is_finite() && hi.is_finite() => Ok(self.with(key, [lo, hi])),
            Some(_) => Err(ComponentError::NonFiniteDomain(key)),
            None => Err(ComponentError::EmptyArray(key)),
        }
    }

    /// x, y, z extents of flattened xyz points
    pub fn of_points(points: &[f64]) -> Result<Self, ComponentError> {
        let mut domain = Self::new();
        for axis in Axis::ALL {
            domain = domain.with_values(
                axis.name(),
                points.iter().skip(axis.offset()).step_by(3).copied(),
            )?;
        }
        Ok(domain)
    }

    /// x, y, z and scalar extents of a surface
    pub fn of_surface(mesh: &SurfaceMesh, scalar_key: &str) -> Result<Self, ComponentError> {
        Self::of_points(&mesh.vertices)?.with_values(scalar_key, mesh.scalars.iter().copied())
    }

    /// x, y, z and scalar extents of a volume grid
    pub fn of_grid(grid: &RawGrid, scalar_key: &str) -> Result<Self, ComponentError> {
        Self::of_points(&grid.points)?.with_values(scalar_key, grid.scalars.iter().copied())
    }

    /// Extent stored under `key`
    pub fn get(&self, key: &str) -> Option<[f64; 2]> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, r)| *r)
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[(String, [f64; 2])] {
        &self.entries
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, range) in &self.entries {
            map.serialize_entry(key, range)?;
        }
        map.end()
    }
}

/// A named numeric array and the element type it is written as
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryArray {
    /// Array name; also the file stem and config key
    pub name: String,
    /// Element type on disk
    pub element_type: ElementType,
    /// Values
    pub data: NumericArray,
}

impl BinaryArray {
    /// Array written as `float32`
    pub fn float32(name: impl Into<String>, data: impl Into<NumericArray>) -> Self {
        Self {
            name: name.into(),
            element_type: ElementType::Float32,
            data: data.into(),
        }
    }

    /// Array written as `int32`
    pub fn int32(name: impl Into<String>, data: impl Into<NumericArray>) -> Self {
        Self {
            name: name.into(),
            element_type: ElementType::Int32,
            data: data.into(),
        }
    }

    /// Surface arrays: `vertices` (float32), `indices` (int32), scalar (float32)
    pub fn surface(mesh: &SurfaceMesh, scalar_key: &str) -> Vec<Self> {
        vec![
            Self::float32("vertices", mesh.vertices.clone()),
            Self::int32("indices", mesh.indices.clone()),
            Self::float32(scalar_key, mesh.scalars.clone()),
        ]
    }

    /// Volume arrays: `vertices` (float32), `indices` (int32), scalar (float32)
    pub fn grid(grid: &RawGrid, scalar_key: &str) -> Vec<Self> {
        vec![
            Self::float32("vertices", grid.points.clone()),
            Self::int32("indices", grid.connectivity.clone()),
            Self::float32(scalar_key, grid.scalars.clone()),
        ]
    }
}

/// The `config.json` record of one component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentConfig {
    /// Display name
    pub name: String,
    /// Extents used by the renderer for color mapping and camera framing
    pub domain: Option<Domain>,
    /// Array name to browser URL, in write order
    pub arrays: Vec<(String, String)>,
}

impl Serialize for ComponentConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.domain.is_some()) + self.arrays.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("name", &self.name)?;
        if let Some(domain) = &self.domain {
            map.serialize_entry("domain", domain)?;
        }
        for (name, url) in &self.arrays {
            map.serialize_entry(name, url)?;
        }
        map.end()
    }
}

impl ComponentConfig {
    /// Serialize with the renderer's `indent=0` layout
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), ComponentError> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }
}

/// Outcome of writing one component
#[derive(Debug, Clone)]
pub struct ComponentStats {
    /// Component directory name
    pub component: String,
    /// Path of the written `config.json`
    pub config_path: PathBuf,
    /// Number of array files written
    pub arrays_written: usize,
    /// Total bytes across array files
    pub bytes_written: usize,
}

impl fmt::Display for ComponentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Component '{}': {} arrays ({} bytes)",
            self.component, self.arrays_written, self.bytes_written
        )
    }
}

/// Writes a component's binary arrays and config record into one directory
#[derive(Debug, Clone)]
pub struct ComponentWriter {
    component: String,
    output_dir: PathBuf,
    browser_prefix: String,
}

impl ComponentWriter {
    /// `output_dir` receives the files; `browser_prefix` is the URL of that
    /// directory as seen by the renderer.
    pub fn new(
        component: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        browser_prefix: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            output_dir: output_dir.into(),
            browser_prefix: browser_prefix.into(),
        }
    }

    /// Directory the files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Browser URL of an array file
    pub fn array_url(&self, array: &str) -> String {
        format!("{}/{}.bin", self.browser_prefix.trim_end_matches('/'), array)
    }

    /// Write every array, then `config.json` referencing them
    pub fn write(
        &self,
        name: &str,
        domain: Option<Domain>,
        arrays: &[BinaryArray],
    ) -> Result<ComponentStats, ComponentError> {
        for (i, array) in arrays.iter().enumerate() {
            if RESERVED_KEYS.contains(&array.name.as_str()) {
                return Err(ComponentError::ReservedArrayName(array.name.clone()));
            }
            if arrays[..i].iter().any(|a| a.name == array.name) {
                return Err(ComponentError::DuplicateArray(array.name.clone()));
            }
        }

        fs::create_dir_all(&self.output_dir)?;

        let mut config = ComponentConfig {
            name: name.to_string(),
            domain,
            arrays: Vec::with_capacity(arrays.len()),
        };

        let mut bytes_written = 0;
        for array in arrays {
            let path = self.output_dir.join(format!("{}.bin", array.name));
            bytes_written += binary::write_array(&path, &array.data, array.element_type)?;
            config.arrays.push((array.name.clone(), self.array_url(&array.name)));
        }

        let config_path = self.output_dir.join(CONFIG_FILE_NAME);
        let mut writer = BufWriter::new(File::create(&config_path)?);
        config.to_writer(&mut writer)?;
        writer.flush()?;
        debug!("Wrote {}", config_path.display());

        let stats = ComponentStats {
            component: self.component.clone(),
            config_path,
            arrays_written: arrays.len(),
            bytes_written,
        };
        info!("{}", stats);
        Ok(stats)
    }
}
