//! Schema-optional in-memory table shared by the analytics views and the
//! report exporter.
//!
//! A `DataTable` comes from either a delimited upload (used verbatim) or a
//! pull from the query service. No schema is enforced beyond what each
//! consumer checks column-by-column; a missing column degrades that
//! consumer's output instead of failing the session.

use std::io::Read;

use serde_json::Value;
use thiserror::Error;

use crate::models::PatientRecord;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Upload has no header row")]
    MissingHeader,
}

/// Loosely-typed tabular data: ordered column names plus rows of JSON
/// values. Cells can be numbers, strings, or null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Parses a delimited upload. The header row names the columns; every
    /// schema is accepted. Numeric-looking cells are stored as numbers so
    /// later aggregation can sum them.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let columns: Vec<String> = rdr
            .headers()
            .map_err(DatasetError::from)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if columns.is_empty() {
            return Err(DatasetError::MissingHeader);
        }

        let mut table = DataTable::new(columns);
        for record in rdr.records() {
            let record = record?;
            let row = record.iter().map(parse_cell).collect();
            table.rows.push(row);
        }
        Ok(table)
    }

    /// Converts a pulled record list into a table with the canonical
    /// patient column order.
    pub fn from_patients(records: &[PatientRecord]) -> Self {
        let columns = vec![
            "id".to_string(),
            "department".to_string(),
            "gender".to_string(),
            "age".to_string(),
            "treatment_cost".to_string(),
            "readmission".to_string(),
            "outcome".to_string(),
        ];
        let mut table = DataTable::new(columns);
        for rec in records {
            table.rows.push(vec![
                Value::from(rec.id),
                Value::from(rec.department.clone()),
                Value::from(rec.gender.clone()),
                Value::from(rec.age),
                Value::from(rec.treatment_cost),
                Value::from(rec.readmission.clone()),
                Value::from(rec.outcome.clone()),
            ]);
        }
        table
    }

    /// Guarantees a `patient_id` column so group-by-identity counts behave
    /// consistently: aliases an existing `id` column, otherwise assigns
    /// sequential integers starting at 1.
    pub fn ensure_id_column(&mut self) {
        if self.column_index("patient_id").is_some() {
            return;
        }
        let values: Vec<Value> = match self.column_index("id") {
            Some(idx) => self.rows.iter().map(|row| row[idx].clone()).collect(),
            None => (1..=self.rows.len() as i64).map(Value::from).collect(),
        };
        self.columns.push("patient_id".to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn row(&self, idx: usize) -> Option<&[Value]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    /// Cell lookup by row index and column name. `None` when either is
    /// absent — callers fall back to zeros or skip the row.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Numeric view of a cell: numbers directly, numeric strings parsed.
    pub fn number(&self, row: usize, column: &str) -> Option<f64> {
        match self.cell(row, column)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text view of a cell; numbers are formatted, null is `None`.
    pub fn text(&self, row: usize, column: &str) -> Option<String> {
        match self.cell(row, column)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

fn parse_cell(field: &str) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::from(f);
    }
    Value::from(trimmed.to_string())
}
