use std::fmt;

use serde::{Deserialize, Serialize};

use super::StreamlineError;

/// One row of a streamline export: a point, the scalar sampled there and the
/// signed integration time from its seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Point coordinates (`Points:0`, `Points:1`, `Points:2`)
    pub position: [f64; 3],
    /// Scalar field sample (e.g. Mach number)
    pub value: f64,
    /// Integration time; 0 marks the seed, positive is forward, negative backward
    pub integration_time: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(position: [f64; 3], value: f64, integration_time: f64) -> Self {
        Self {
            position,
            value,
            integration_time,
        }
    }

    /// Whether this sample is a seed point (integration time exactly zero)
    pub fn is_seed(&self) -> bool {
        self.integration_time == 0.0
    }

    /// Euclidean distance to another sample
    pub fn distance_to(&self, other: &Sample) -> f64 {
        self.position
            .iter()
            .zip(other.position.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// How seed points are compared when stitching forward and backward runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedIdentity {
    /// Exact string equality of the shortest round-trip formatting of each
    /// coordinate, as ParaView writes it.
    #[default]
    Exact,
    /// Coordinates rounded to the given number of decimal places.
    Quantized(u32),
}

/// Largest decimal count a quantized seed identity accepts
pub const MAX_QUANTIZED_DECIMALS: u32 = 17;

impl SeedIdentity {
    /// Reject settings the key function cannot honour
    pub fn validate(&self) -> Result<(), StreamlineError> {
        match *self {
            SeedIdentity::Quantized(decimals) if decimals > MAX_QUANTIZED_DECIMALS => {
                Err(StreamlineError::InvalidSeedIdentity { decimals })
            }
            _ => Ok(()),
        }
    }

    /// Compute the identity key of a seed sample
    pub fn key(&self, sample: &Sample) -> SeedKey {
        let [x, y, z] = sample.position;
        match *self {
            SeedIdentity::Exact => SeedKey(format!("{}, {}, {}", x, y, z)),
            SeedIdentity::Quantized(decimals) => {
                let d = decimals as usize;
                SeedKey(format!(
                    "{}, {}, {}",
                    quantize(x, d),
                    quantize(y, d),
                    quantize(z, d)
                ))
            }
        }
    }
}

impl fmt::Display for SeedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedIdentity::Exact => write!(f, "exact"),
            SeedIdentity::Quantized(d) => write!(f, "quantized({} decimals)", d),
        }
    }
}

/// Rounded decimal text of `v`; values that round to zero lose their sign.
fn quantize(v: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, v);
    match s.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => s,
    }
}

/// Identity of a streamline, derived from its seed point
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeedKey(String);

impl SeedKey {
    /// The key's textual form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
