use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;

use super::{Sample, StreamlineError};

/// Column names of a ParaView streamline export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Columns holding the x, y and z coordinates
    pub position: [String; 3],
    /// Column holding the signed integration time
    pub integration_time: String,
    /// Scalar column exported as the streamline's `Values` channel
    pub value: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            position: [
                "Points:0".to_string(),
                "Points:1".to_string(),
                "Points:2".to_string(),
            ],
            integration_time: "IntegrationTime".to_string(),
            value: "Mach".to_string(),
        }
    }
}

impl TableSchema {
    /// Default ParaView column names with a different scalar column
    pub fn with_value_field(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    fn required(&self) -> [&str; 5] {
        [
            &self.position[0],
            &self.position[1],
            &self.position[2],
            &self.value,
            &self.integration_time,
        ]
    }
}

/// Resolved column positions for one table
struct ColumnIndex {
    columns: [usize; 5],
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, schema: &TableSchema) -> Result<Self, StreamlineError> {
        let mut columns = [0usize; 5];
        for (slot, name) in columns.iter_mut().zip(schema.required()) {
            *slot = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| StreamlineError::MissingColumn(name.to_string()))?;
        }
        Ok(Self { columns })
    }

    fn sample(
        &self,
        row: usize,
        record: &StringRecord,
        schema: &TableSchema,
    ) -> Result<Sample, StreamlineError> {
        let mut values = [0f64; 5];
        for ((out, &col), name) in values.iter_mut().zip(&self.columns).zip(schema.required()) {
            let cell = record.get(col).ok_or_else(|| StreamlineError::MalformedInput {
                row,
                field: name.to_string(),
            })?;
            *out = cell
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| StreamlineError::SchemaMismatch {
                    row,
                    field: name.to_string(),
                    value: cell.to_string(),
                })?;
        }
        let [x, y, z, value, integration_time] = values;
        Ok(Sample::new([x, y, z], value, integration_time))
    }
}

/// Read all samples from a CSV streamline export on disk
pub fn read_samples_from_path<P: AsRef<Path>>(
    path: P,
    schema: &TableSchema,
) -> Result<Vec<Sample>, StreamlineError> {
    let file = File::open(path)?;
    read_samples(BufReader::new(file), schema)
}

/// Read all samples from a CSV streamline export, preserving row order.
///
/// Only the five required columns are parsed; any other column is ignored.
/// `nan` and `inf` cells are rejected since JSON cannot carry them.
pub fn read_samples<R: Read>(reader: R, schema: &TableSchema) -> Result<Vec<Sample>, StreamlineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let index = ColumnIndex::resolve(csv_reader.headers()?, schema)?;

    let mut samples = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        samples.push(index.sample(row, &record, schema)?);
    }

    log::debug!("Read {} samples", samples.len());
    Ok(samples)
}
