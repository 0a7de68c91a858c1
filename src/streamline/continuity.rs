use std::fmt;

use super::Streamline;

/// Two consecutive samples of a streamline further apart than allowed
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuityGap {
    /// Index of the first sample of the pair
    pub index: usize,
    /// Distance between the two samples
    pub distance: f64,
    /// Integration times of the pair
    pub times: [f64; 2],
}

impl fmt::Display for ContinuityGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gap of {:.6} between samples {} and {} (t = {} .. {})",
            self.distance,
            self.index,
            self.index + 1,
            self.times[0],
            self.times[1]
        )
    }
}

/// Find consecutive samples separated by more than `tolerance`.
///
/// Reconstruction trusts the exporter's row order; a large jump here usually
/// means two different seeds were merged or a run was attached to the wrong
/// seed.
pub fn continuity_gaps(line: &Streamline, tolerance: f64) -> Vec<ContinuityGap> {
    line.samples()
        .windows(2)
        .enumerate()
        .filter_map(|(index, pair)| {
            let distance = pair[0].distance_to(&pair[1]);
            (distance > tolerance).then(|| ContinuityGap {
                index,
                distance,
                times: [pair[0].integration_time, pair[1].integration_time],
            })
        })
        .collect()
}
