//! # Case Conversion
//!
//! A case is one simulation run exported from ParaView into its own
//! directory. Converting it produces, next to (or mirrored from) the inputs:
//!
//! - `<component>/config.json` and `<component>/<array>.bin` for each surface
//!   and volume component
//! - one streamline JSON document per configured table
//!
//! The case name is always passed explicitly, so one configuration can be
//! applied to several cases in a single run.

mod config;
mod convert;
mod error;
mod paths;


pub use config::{CaseConfig, PathsConfig, StreamlineSetConfig, SurfaceConfig, VolumeConfig};
pub use convert::{convert_all, convert_case, CaseReport, StreamlineSetReport};
pub use error::CaseError;
pub use paths::CasePaths;
