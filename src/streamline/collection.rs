use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Sample, StreamlineError};

/// One reconstructed streamline: samples sorted by integration time
#[derive(Debug, Clone, PartialEq)]
pub struct Streamline {
    samples: Vec<Sample>,
}

impl Streamline {
    /// Wrap already-ordered samples
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the streamline has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in integration-time order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The seed sample, if the line still carries one
    pub fn seed(&self) -> Option<&Sample> {
        self.samples.iter().find(|s| s.is_seed())
    }

    /// First and last integration time
    pub fn integration_span(&self) -> Option<[f64; 2]> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some([first.integration_time, last.integration_time]),
            _ => None,
        }
    }

    /// Flatten into the renderer's three parallel arrays
    pub fn to_arrays(&self) -> StreamlineArrays {
        let mut arrays = StreamlineArrays {
            points: Vec::with_capacity(self.samples.len() * 3),
            values: Vec::with_capacity(self.samples.len()),
            integration_time: Vec::with_capacity(self.samples.len()),
        };
        for sample in &self.samples {
            arrays.points.extend_from_slice(&sample.position);
            arrays.values.push(sample.value);
            arrays.integration_time.push(sample.integration_time);
        }
        arrays
    }
}

/// Serialized shape of one streamline, as read by the browser renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamlineArrays {
    /// Flattened x, y, z triples
    #[serde(rename = "Points")]
    pub points: Vec<f64>,
    /// Scalar samples
    #[serde(rename = "Values")]
    pub values: Vec<f64>,
    /// Integration time samples
    #[serde(rename = "IntegrationTime")]
    pub integration_time: Vec<f64>,
}

impl StreamlineArrays {
    /// Number of samples described by the arrays
    pub fn sample_count(&self) -> usize {
        self.values.len()
    }

    /// Check `Points.len == 3 * Values.len == 3 * IntegrationTime.len`
    pub fn check_lengths(&self, index: usize) -> Result<(), StreamlineError> {
        if self.points.len() != 3 * self.values.len() {
            return Err(StreamlineError::InvalidStreamline {
                index,
                reason: format!(
                    "{} point coordinates for {} values",
                    self.points.len(),
                    self.values.len()
                ),
            });
        }
        if self.values.len() != self.integration_time.len() {
            return Err(StreamlineError::InvalidStreamline {
                index,
                reason: format!(
                    "{} values but {} integration times",
                    self.values.len(),
                    self.integration_time.len()
                ),
            });
        }
        Ok(())
    }

    /// Rebuild samples from the parallel arrays
    pub fn to_streamline(&self, index: usize) -> Result<Streamline, StreamlineError> {
        self.check_lengths(index)?;
        let samples = self
            .points
            .chunks_exact(3)
            .zip(self.values.iter().zip(&self.integration_time))
            .map(|(p, (&value, &time))| Sample::new([p[0], p[1], p[2]], value, time))
            .collect();
        Ok(Streamline::new(samples))
    }
}

/// Ordered set of reconstructed streamlines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamlineCollection {
    lines: Vec<Streamline>,
}

impl StreamlineCollection {
    /// Wrap streamlines in seed order
    pub fn new(lines: Vec<Streamline>) -> Self {
        Self { lines }
    }

    /// Number of streamlines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Streamlines in seed order
    pub fn lines(&self) -> &[Streamline] {
        &self.lines
    }

    /// Iterate over streamlines
    pub fn iter(&self) -> std::slice::Iter<'_, Streamline> {
        self.lines.iter()
    }

    /// Total number of samples across all streamlines
    pub fn sample_count(&self) -> usize {
        self.lines.iter().map(Streamline::len).sum()
    }

    /// Per-line parallel arrays, in order
    pub fn to_arrays(&self) -> Vec<StreamlineArrays> {
        self.lines.iter().map(Streamline::to_arrays).collect()
    }

    /// Aggregate extents of the collection
    pub fn summary(&self) -> CollectionSummary {
        let mut summary = CollectionSummary {
            lines: self.lines.len(),
            samples: 0,
            integration_span: None,
            value_domain: None,
        };
        for sample in self.lines.iter().flat_map(|l| l.samples()) {
            summary.samples += 1;
            extend(&mut summary.integration_span, sample.integration_time);
            extend(&mut summary.value_domain, sample.value);
        }
        summary
    }

    /// Write the renderer JSON document (`indent=0` layout).
    ///
    /// Fails on NaN or infinite samples, which JSON would turn into `null`.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), StreamlineError> {
        self.check_finite()?;
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.to_arrays().serialize(&mut serializer)?;
        Ok(())
    }

    fn check_finite(&self) -> Result<(), StreamlineError> {
        for (index, line) in self.lines.iter().enumerate() {
            let bad = line.samples().iter().position(|s| {
                !(s.position.iter().all(|c| c.is_finite())
                    && s.value.is_finite()
                    && s.integration_time.is_finite())
            });
            if let Some(sample) = bad {
                return Err(StreamlineError::InvalidStreamline {
                    index,
                    reason: format!("sample {} is not finite", sample),
                });
            }
        }
        Ok(())
    }

    /// Write the renderer JSON document to a file
    pub fn write_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), StreamlineError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Parse a renderer JSON document, checking the array length relationship
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, StreamlineError> {
        let arrays: Vec<StreamlineArrays> = serde_json::from_reader(reader)?;
        let lines = arrays
            .iter()
            .enumerate()
            .map(|(i, a)| a.to_streamline(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(lines))
    }

    /// Parse a renderer JSON document from a file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StreamlineError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }
}

impl<'a> IntoIterator for &'a StreamlineCollection {
    type Item = &'a Streamline;
    type IntoIter = std::slice::Iter<'a, Streamline>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

fn extend(range: &mut Option<[f64; 2]>, v: f64) {
    *range = Some(match *range {
        Some([lo, hi]) => [lo.min(v), hi.max(v)],
        None => [v, v],
    });
}

/// Extents of a streamline collection.
///
/// The renderer animates over the integration span, so it is reported here
/// rather than being hard-coded on the browser side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Number of streamlines
    pub lines: usize,
    /// Total samples
    pub samples: usize,
    /// `[min, max]` integration time
    pub integration_span: Option<[f64; 2]>,
    /// `[min, max]` scalar value
    pub value_domain: Option<[f64; 2]>,
}

impl CollectionSummary {
    /// Write the summary as pretty JSON
    pub fn write_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), StreamlineError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for CollectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} streamlines ({} samples)", self.lines, self.samples)?;
        if let Some([lo, hi]) = self.integration_span {
            write!(f, ", integration time [{}, {}]", lo, hi)?;
        }
        if let Some([lo, hi]) = self.value_domain {
            write!(f, ", values [{}, {}]", lo, hi)?;
        }
        Ok(())
    }
}
