//! Read-only analytics views over the loaded dataset.
//!
//! Every view independently re-derives its aggregates from the same
//! `DataTable` on each display cycle — there is no inter-view
//! communication and no shared cache. Shared policy: a missing required
//! column produces a warning naming the available columns (never a
//! panic), and an empty dataset produces zero-valued output.

pub mod flow;
pub mod forecast;
pub mod heatmap;
pub mod radar;
pub mod summary;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::dataset::DataTable;

#[derive(Error, Debug, PartialEq)]
pub enum ViewError {
    #[error("Missing required columns {missing:?}; available: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
}

/// Checks a view's required columns, collecting every absentee so the
/// warning can name them all at once.
pub fn require_columns(table: &DataTable, required: &[&str]) -> Result<(), ViewError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ViewError::MissingColumns {
            missing,
            available: table.columns().to_vec(),
        })
    }
}

/// Groups row indices by the text value of one categorical column.
/// Rows with a null cell in that column are skipped. BTreeMap keeps the
/// group order deterministic.
pub(crate) fn group_rows(table: &DataTable, column: &str) -> BTreeMap<String, Vec<usize>> {
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for row in 0..table.len() {
        if let Some(key) = table.text(row, column) {
            groups.entry(key).or_default().push(row);
        }
    }
    groups
}

/// Mean of a numeric column over the given rows; `None` when no row has a
/// usable number.
pub(crate) fn mean_over(table: &DataTable, rows: &[usize], column: &str) -> Option<f64> {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|&r| table.number(r, column))
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sum of a numeric column over the given rows (missing cells count as 0).
pub(crate) fn sum_over(table: &DataTable, rows: &[usize], column: &str) -> f64 {
    rows.iter().filter_map(|&r| table.number(r, column)).sum()
}
