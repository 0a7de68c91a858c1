//! # Output Validation
//!
//! Re-reads a streamline JSON document and checks the invariants the
//! renderer relies on:
//!
//! 1. **Parse**: the document is a list of `{Points, Values, IntegrationTime}`
//! 2. **Lengths**: `Points.len == 3 * Values.len == 3 * IntegrationTime.len`
//! 3. **Drawable**: every line has at least two samples
//! 4. **Ordering**: `IntegrationTime` is ascending within each line
//! 5. **Continuity** (optional): no jump between consecutive samples exceeds a
//!    tolerance; reported as a warning only
//!
//! ```rust,no_run
//! use aerovis::validator::validate_streamline_file;
//! use std::path::Path;
//!
//! let report = validate_streamline_file(Path::new("vortex.json"), Some(0.05))?;
//! println!("{}", report);
//! # Ok::<(), aerovis::validator::ValidationError>(())
//! ```

mod report;


use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

use crate::streamline::{continuity_gaps, StreamlineArrays, MIN_STREAMLINE_SAMPLES};

/// Errors that prevent validation from running at all
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// I/O error opening the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Validate a streamline JSON document on disk
pub fn validate_streamline_file(
    path: &Path,
    continuity_tolerance: Option<f64>,
) -> Result<ValidationReport, ValidationError> {
    let file = File::open(path)?;
    Ok(validate_streamlines(
        BufReader::new(file),
        path.display().to_string(),
        continuity_tolerance,
    ))
}

/// Validate a streamline JSON document from any reader
pub fn validate_streamlines<R: Read>(
    reader: R,
    label: impl Into<String>,
    continuity_tolerance: Option<f64>,
) -> ValidationReport {
    let mut report = ValidationReport::new(label);

    let lines: Vec<StreamlineArrays> = match serde_json::from_reader(reader) {
        Ok(lines) => {
            report.add_check(ValidationCheck::ok("Streamline JSON parses"));
            lines
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed("Streamline JSON parses", e.to_string()));
            return report;
        }
    };

    if lines.is_empty() {
        report.add_check(ValidationCheck::warning(
            "Collection is not empty",
            "document contains no streamlines",
        ));
        return report;
    }
    report.add_check(ValidationCheck::ok(format!(
        "Collection is not empty ({} streamlines)",
        lines.len()
    )));

    check_each(&mut report, &lines, "Array lengths agree", |i, line| {
        line.check_lengths(i).err().map(|e| e.to_string())
    });

    check_each(&mut report, &lines, "Every line is drawable", |i, line| {
        (line.sample_count() < MIN_STREAMLINE_SAMPLES)
            .then(|| format!("streamline {} has {} samples", i, line.sample_count()))
    });

    check_each(&mut report, &lines, "IntegrationTime is ascending", |i, line| {
        line.integration_time
            .windows(2)
            .position(|w| w[0] > w[1])
            .map(|p| format!("streamline {} decreases at sample {}", i, p + 1))
    });

    if let Some(tolerance) = continuity_tolerance {
        check_continuity(&mut report, &lines, tolerance);
    }

    report
}

/// Record one check over all lines, failing with the first problem found
fn check_each<F>(report: &mut ValidationReport, lines: &[StreamlineArrays], name: &str, problem: F)
where
    F: Fn(usize, &StreamlineArrays) -> Option<String>,
{
    let mut problems = lines.iter().enumerate().filter_map(|(i, l)| problem(i, l));
    match problems.next() {
        None => report.add_check(ValidationCheck::ok(name)),
        Some(first) => {
            let more = problems.count();
            let message = if more > 0 {
                format!("{} (and {} more)", first, more)
            } else {
                first
            };
            report.add_check(ValidationCheck::failed(name, message));
        }
    }
}

fn check_continuity(report: &mut ValidationReport, lines: &[StreamlineArrays], tolerance: f64) {
    let name = format!("Consecutive samples within {}", tolerance);
    let mut gaps = 0usize;
    let mut worst: Option<(usize, f64)> = None;

    for (i, arrays) in lines.iter().enumerate() {
        let Ok(line) = arrays.to_streamline(i) else {
            continue;
        };
        for gap in continuity_gaps(&line, tolerance) {
            gaps += 1;
            if worst.map_or(true, |(_, d)| gap.distance > d) {
                worst = Some((i, gap.distance));
            }
        }
    }

    match worst {
        None => report.add_check(ValidationCheck::ok(name)),
        Some((line, distance)) => report.add_check(ValidationCheck::warning(
            name,
            format!(
                "{} gaps, largest {:.6} in streamline {}",
                gaps, distance, line
            ),
        )),
    }
}
