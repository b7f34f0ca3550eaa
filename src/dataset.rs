use std::collections::HashMap;
use std::path::Path;

use crate::error::BenchError;

/// One CSV data row, keyed by the header's field names. Values stay raw text;
/// typing happens later in the mapper.
pub type CsvRecord = HashMap<String, String>;

/// Read a headered CSV file into records, preserving file order.
///
/// Columns beyond the ones the mapper consumes are carried along untouched.
pub fn load(path: &Path) -> Result<Vec<CsvRecord>, BenchError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: CsvRecord = row?;
        records.push(record);
    }

    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
