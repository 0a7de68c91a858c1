//! # aerovis - ParaView exports for the browser
//!
//! `aerovis` turns the files a ParaView session exports for an aerodynamic
//! case study into assets a WebGL renderer can fetch directly.
//!
//! ## Outputs
//!
//! - **Components**: a `config.json` record (name, coordinate and scalar
//!   domains, array URLs) plus one headerless binary file per array, written
//!   as `float32` (positions, scalars) or `int32` (indices).
//!
//! - **Streamlines**: ParaView writes each streamline as two separate runs
//!   (along and against the flow) in one flat CSV table. They are stitched back
//!   into single time-ordered polylines and written as JSON.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aerovis::case::{convert_all, CaseConfig};
//! use std::path::Path;
//!
//! let config = CaseConfig::from_file(Path::new("aerovis.toml"))?;
//! for report in convert_all(&config, &[])? {
//!     println!("{}", report);
//! }
//! # Ok::<(), aerovis::case::CaseError>(())
//! ```
//!
//! Streamlines alone:
//!
//! ```rust,no_run
//! use aerovis::streamline::{convert_streamlines, ReconstructOptions, TableSchema};
//!
//! let summary = convert_streamlines(
//!     "vortex_streamlines_5000.csv",
//!     "vortex.json",
//!     &TableSchema::default(),
//!     ReconstructOptions::default(),
//! )?;
//! println!("{}", summary);
//! # Ok::<(), aerovis::streamline::StreamlineError>(())
//! ```

pub mod binary;
pub mod case;
pub mod component;
pub mod mesh;
pub mod streamline;
pub mod validator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::binary::{ElementType, NumericArray};
    pub use crate::case::{convert_all, convert_case, CaseConfig, CaseReport};
    pub use crate::component::{BinaryArray, ComponentWriter, Domain};
    pub use crate::mesh::{RawGrid, SurfaceMesh};
    pub use crate::streamline::{
        ReconstructOptions, Sample, SeedIdentity, Streamline, StreamlineCollection,
        StreamlineReconstructor,
    };
}
