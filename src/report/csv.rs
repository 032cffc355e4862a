//! Delimited-text serializer.

use serde_json::Value;

use super::ExportError;
use crate::dataset::DataTable;

/// Serializes the table as UTF-8 CSV: header row, then one line per row.
/// Null cells become empty fields.
pub fn to_csv_bytes(table: &DataTable) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;

    for i in 0..table.len() {
        let row = table.row(i).unwrap_or(&[]);
        let fields: Vec<String> = row.iter().map(cell_to_field).collect();
        writer.write_record(&fields)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))
}

fn cell_to_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
