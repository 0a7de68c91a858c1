use std::collections::HashMap;

use log::{debug, info, warn};

use super::continuity::continuity_gaps;
use super::{Sample, SeedIdentity, SeedKey, Streamline, StreamlineCollection, StreamlineError};

/// Smallest number of samples a streamline must keep to be drawable
pub const MIN_STREAMLINE_SAMPLES: usize = 2;

/// Options controlling streamline reconstruction
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructOptions {
    /// How seed points are matched between forward and backward runs
    pub seed_identity: SeedIdentity,
    /// Streamlines with fewer samples are discarded (never below 2)
    pub min_samples: usize,
    /// Keep only the first N streamlines, in seed order
    pub max_lines: Option<usize>,
    /// Warn about consecutive samples further apart than this distance
    pub continuity_tolerance: Option<f64>,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            seed_identity: SeedIdentity::Exact,
            min_samples: MIN_STREAMLINE_SAMPLES,
            max_lines: None,
            continuity_tolerance: None,
        }
    }
}

impl ReconstructOptions {
    /// Set the seed identity strategy
    pub fn seed_identity(mut self, seed_identity: SeedIdentity) -> Self {
        self.seed_identity = seed_identity;
        self
    }

    /// Set the minimum number of samples per streamline
    pub fn min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Limit the number of streamlines returned
    pub fn max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Enable the post-hoc continuity check
    pub fn continuity_tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.continuity_tolerance = tolerance;
        self
    }
}

/// Stitches the forward and backward runs of a ParaView streamline export
/// into continuous, time-ordered polylines.
///
/// ParaView writes each seed's forward run (starting at the seed, t = 0),
/// then the seed again followed by the backward run. Samples are grouped by
/// the seed they follow, so the reconstructor relies on that row order and
/// performs no geometric matching of its own.
#[derive(Debug, Clone, Default)]
pub struct StreamlineReconstructor {
    options: ReconstructOptions,
}

impl StreamlineReconstructor {
    /// Create a reconstructor with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconstructor with custom options
    pub fn with_options(options: ReconstructOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Reconstruct streamlines from samples in source-table order.
    ///
    /// Streamlines come out in the order their seeds were first seen, each
    /// sorted by integration time. Lines shorter than the minimum are dropped.
    pub fn reconstruct<I>(&self, samples: I) -> Result<StreamlineCollection, StreamlineError>
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut seeds: HashMap<SeedKey, usize> = HashMap::new();
        let mut lines: Vec<Vec<Sample>> = Vec::new();
        let mut active: Option<usize> = None;
        let mut sample_count = 0usize;

        for (index, sample) in samples.into_iter().enumerate() {
            sample_count += 1;

            if sample.is_seed() {
                let key = self.options.seed_identity.key(&sample);
                let line = match seeds.get(&key).copied() {
                    // The repeated seed is not stored twice.
                    Some(existing) => existing,
                    None => {
                        lines.push(vec![sample]);
                        let new_index = lines.len() - 1;
                        seeds.insert(key, new_index);
                        new_index
                    }
                };
                active = Some(line);
                continue;
            }

            let line = active.ok_or(StreamlineError::OrphanSample {
                index,
                integration_time: sample.integration_time,
            })?;
            lines[line].push(sample);
        }

        let seed_count = lines.len();
        let min_samples = self.options.min_samples.max(MIN_STREAMLINE_SAMPLES);

        let mut streamlines: Vec<Streamline> = lines
            .into_iter()
            .map(|mut samples| {
                samples.sort_by(|a, b| a.integration_time.total_cmp(&b.integration_time));
                Streamline::new(samples)
            })
            .filter(|line| line.len() >= min_samples)
            .collect();

        let dropped = seed_count - streamlines.len();
        if dropped > 0 {
            debug!("Dropped {} streamlines with fewer than {} samples", dropped, min_samples);
        }

        if let Some(max_lines) = self.options.max_lines {
            if streamlines.len() > max_lines {
                debug!("Truncating {} streamlines to {}", streamlines.len(), max_lines);
                streamlines.truncate(max_lines);
            }
        }

        if let Some(tolerance) = self.options.continuity_tolerance {
            for (line_index, line) in streamlines.iter().enumerate() {
                for gap in continuity_gaps(line, tolerance) {
                    warn!("Streamline {}: {}", line_index, gap);
                }
            }
        }

        info!(
            "Reconstructed {} streamlines from {} samples ({} seeds)",
            streamlines.len(),
            sample_count,
            seed_count
        );

        Ok(StreamlineCollection::new(streamlines))
    }
}
