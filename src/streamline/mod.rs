//! # Streamline Module
//!
//! Rebuilds continuous streamlines from a ParaView streamline export and
//! writes them in the JSON layout read by the browser renderer.
//!
//! ## Input
//!
//! ParaView seeds streamlines at random points inside a seed sphere and
//! integrates along and against the velocity from each seed. The export is a
//! flat table, one row per sample, with the forward and backward runs written
//! as separate segments that both start at the seed (`IntegrationTime == 0`).
//!
//! ## Reconstruction
//!
//! 1. Group rows by the seed they follow; a repeated seed switches back to
//!    the line already started for it.
//! 2. Sort each group by integration time, joining the backward run
//!    (negative times) and the forward run (positive times) at the seed.
//! 3. Drop lines with fewer than two samples.
//!
//! ```rust
//! use aerovis::streamline::{Sample, StreamlineReconstructor};
//!
//! let samples = vec![
//!     Sample::new([0.0, 0.0, 0.0], 0.5, 0.0),
//!     Sample::new([1.0, 0.0, 0.0], 0.6, 1.0),
//!     Sample::new([0.0, 0.0, 0.0], 0.5, 0.0),
//!     Sample::new([-1.0, 0.0, 0.0], 0.4, -1.0),
//! ];
//!
//! let collection = StreamlineReconstructor::new().reconstruct(samples)?;
//! assert_eq!(collection.len(), 1);
//! assert_eq!(collection.lines()[0].len(), 3);
//! # Ok::<(), aerovis::streamline::StreamlineError>(())
//! ```

mod collection;
mod continuity;
mod error;
mod reconstruct;
mod sample;
mod table;


use std::path::Path;

pub use collection::{CollectionSummary, Streamline, StreamlineArrays, StreamlineCollection};
pub use continuity::{continuity_gaps, ContinuityGap};
pub use error::StreamlineError;
pub use reconstruct::{ReconstructOptions, StreamlineReconstructor, MIN_STREAMLINE_SAMPLES};
pub use sample::{Sample, SeedIdentity, SeedKey, MAX_QUANTIZED_DECIMALS};
pub use table::{read_samples, read_samples_from_path, TableSchema};

/// Read a CSV streamline export, reconstruct it and write the renderer JSON.
pub fn convert_streamlines<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    schema: &TableSchema,
    options: ReconstructOptions,
) -> Result<CollectionSummary, StreamlineError> {
    let samples = read_samples_from_path(input.as_ref(), schema)?;
    let collection = StreamlineReconstructor::with_options(options).reconstruct(samples)?;
    collection.write_json_file(output.as_ref())?;
    Ok(collection.summary())
}
