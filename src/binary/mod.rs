//! Raw binary arrays
//!
//! The renderer fetches each numeric array as a headerless file of fixed-width
//! elements: `float32` for positions and scalars, `int32` for connectivity.
//! There is no length prefix and no byte-order marker; both sides use the
//! host's native byte order.

mod error;

#[cfg(test)]
mod tests;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

pub use error::BinaryError;

/// Element type of a binary array file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// 32-bit IEEE float
    Float32,
    /// 32-bit signed integer
    Int32,
}

impl ElementType {
    /// Bytes per element
    pub fn size(&self) -> usize {
        4
    }

    /// numpy-style dtype name
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Float32 => "float32",
            ElementType::Int32 => "int32",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = BinaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "float32" | "f32" => Ok(ElementType::Float32),
            "int32" | "i32" => Ok(ElementType::Int32),
            other => Err(BinaryError::UnsupportedElementType(other.to_string())),
        }
    }
}

/// In-memory numeric array before it is narrowed to its file element type
#[derive(Debug, Clone, PartialEq)]
pub enum NumericArray {
    /// Floating-point values
    Float(Vec<f64>),
    /// Integer values (indices, connectivity)
    Int(Vec<i64>),
}

impl NumericArray {
    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            NumericArray::Float(v) => v.len(),
            NumericArray::Int(v) => v.len(),
        }
    }

    /// Whether the array is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values widened to f64
    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            NumericArray::Float(v) => v.clone(),
            NumericArray::Int(v) => v.iter().map(|&x| x as f64).collect(),
        }
    }

    /// Minimum, maximum and count
    pub fn stats(&self) -> ArrayStats {
        let mut stats = ArrayStats {
            len: self.len(),
            min: None,
            max: None,
        };
        for v in self.to_f64() {
            stats.min = Some(stats.min.map_or(v, |m: f64| m.min(v)));
            stats.max = Some(stats.max.map_or(v, |m: f64| m.max(v)));
        }
        stats
    }
}

impl From<Vec<f64>> for NumericArray {
    fn from(v: Vec<f64>) -> Self {
        NumericArray::Float(v)
    }
}

impl From<Vec<i64>> for NumericArray {
    fn from(v: Vec<i64>) -> Self {
        NumericArray::Int(v)
    }
}

/// Summary of an array's contents
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayStats {
    /// Element count
    pub len: usize,
    /// Smallest value
    pub min: Option<f64>,
    /// Largest value
    pub max: Option<f64>,
}

impl fmt::Display for ArrayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "{} elements, range [{}, {}]", self.len, min, max),
            _ => write!(f, "{} elements", self.len),
        }
    }
}

/// Encode an array as native-endian elements of the given type
pub fn encode(array: &NumericArray, element_type: ElementType) -> Result<Vec<u8>, BinaryError> {
    let mut buffer = Vec::with_capacity(array.len() * element_type.size());
    write_to(&mut buffer, array, element_type)?;
    Ok(buffer)
}

/// Write an array as native-endian elements to any writer
pub fn write_to<W: Write>(
    writer: &mut W,
    array: &NumericArray,
    element_type: ElementType,
) -> Result<(), BinaryError> {
    match (array, element_type) {
        (NumericArray::Float(values), ElementType::Float32) => {
            for &v in values {
                writer.write_f32::<NativeEndian>(v as f32)?;
            }
        }
        (NumericArray::Int(values), ElementType::Float32) => {
            for &v in values {
                writer.write_f32::<NativeEndian>(v as f32)?;
            }
        }
        (NumericArray::Int(values), ElementType::Int32) => {
            for (index, &v) in values.iter().enumerate() {
                let narrowed = i32::try_from(v).map_err(|_| BinaryError::SchemaMismatch {
                    index,
                    value: v.to_string(),
                    element_type,
                })?;
                writer.write_i32::<NativeEndian>(narrowed)?;
            }
        }
        (NumericArray::Float(values), ElementType::Int32) => {
            for (index, &v) in values.iter().enumerate() {
                if v.fract() != 0.0 || v < i32::MIN as f64 || v > i32::MAX as f64 || !v.is_finite() {
                    return Err(BinaryError::SchemaMismatch {
                        index,
                        value: v.to_string(),
                        element_type,
                    });
                }
                writer.write_i32::<NativeEndian>(v as i32)?;
            }
        }
    }
    Ok(())
}

/// Write an array to a headerless binary file
pub fn write_array<P: AsRef<Path>>(
    path: P,
    array: &NumericArray,
    element_type: ElementType,
) -> Result<usize, BinaryError> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_to(&mut writer, array, element_type)?;
    writer.flush()?;
    let bytes = array.len() * element_type.size();
    log::debug!(
        "Wrote {} {} elements ({} bytes) to {}",
        array.len(),
        element_type,
        bytes,
        path.as_ref().display()
    );
    Ok(bytes)
}

/// Decode native-endian elements of the given type.
///
/// `expected_len` is the element count when known; the byte length must then
/// match exactly.
pub fn decode(
    bytes: &[u8],
    element_type: ElementType,
    expected_len: Option<usize>,
) -> Result<NumericArray, BinaryError> {
    let size = element_type.size();
    if let Some(n) = expected_len {
        if bytes.len() != n * size {
            return Err(BinaryError::InvalidLength {
                expected: n * size,
                actual: bytes.len(),
            });
        }
    } else if bytes.len() % size != 0 {
        return Err(BinaryError::InvalidLength {
            expected: bytes.len() - bytes.len() % size,
            actual: bytes.len(),
        });
    }

    let count = bytes.len() / size;
    let mut cursor = bytes;
    match element_type {
        ElementType::Float32 => {
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(cursor.read_f32::<NativeEndian>()? as f64);
            }
            Ok(NumericArray::Float(values))
        }
        ElementType::Int32 => {
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(cursor.read_i32::<NativeEndian>()? as i64);
            }
            Ok(NumericArray::Int(values))
        }
    }
}

/// Read a headerless binary file written by [`write_array`]
pub fn read_array<P: AsRef<Path>>(
    path: P,
    element_type: ElementType,
    expected_len: Option<usize>,
) -> Result<NumericArray, BinaryError> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    decode(&bytes, element_type, expected_len)
}
