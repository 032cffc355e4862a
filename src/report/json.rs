//! Structured-record serializer: one JSON object per row.

use serde_json::{Map, Value};

use super::ExportError;
use crate::dataset::DataTable;

pub fn to_json_bytes(table: &DataTable) -> Result<Vec<u8>, ExportError> {
    let records: Vec<Value> = (0..table.len())
        .map(|i| {
            let mut object = Map::new();
            let row = table.row(i).unwrap_or(&[]);
            for (column, cell) in table.columns().iter().zip(row) {
                object.insert(column.clone(), cell.clone());
            }
            Value::Object(object)
        })
        .collect();

    Ok(serde_json::to_vec_pretty(&records)?)
}
