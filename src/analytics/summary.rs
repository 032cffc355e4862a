//! Executive KPI summary: headline numbers plus the department, outcome,
//! and gender distributions shown on the overview screen.
//!
//! This view degrades column-by-column instead of requiring a schema:
//! each aggregate falls back to zero or empty when its column is absent.

use serde::Serialize;

use super::{group_rows, mean_over, sum_over};
use crate::dataset::DataTable;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub total_patients: usize,
    /// Sum of `treatment_cost`; 0 when the column is absent.
    pub total_revenue: f64,
    /// Percentage of rows with readmission == "Yes"; 0 when absent.
    pub readmission_rate: f64,
    /// Mean of `length_of_stay` when the upload carries one.
    pub avg_length_of_stay: Option<f64>,
    /// (department, admissions), largest first.
    pub admissions_by_department: Vec<(String, usize)>,
    pub outcome_distribution: Vec<(String, usize)>,
    pub gender_distribution: Vec<(String, usize)>,
    /// (department, revenue), largest first.
    pub revenue_by_department: Vec<(String, f64)>,
}

pub fn summarize(table: &DataTable) -> SummaryReport {
    let all_rows: Vec<usize> = (0..table.len()).collect();

    let total_revenue = if table.has_column("treatment_cost") {
        sum_over(table, &all_rows, "treatment_cost")
    } else {
        0.0
    };

    let readmission_rate = if table.has_column("readmission") && !table.is_empty() {
        let yes = all_rows
            .iter()
            .filter(|&&r| table.text(r, "readmission").as_deref() == Some("Yes"))
            .count();
        100.0 * yes as f64 / table.len() as f64
    } else {
        0.0
    };

    let avg_length_of_stay = if table.has_column("length_of_stay") {
        mean_over(table, &all_rows, "length_of_stay")
    } else {
        None
    };

    let mut admissions_by_department = counts_for(table, "department");
    admissions_by_department.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut revenue_by_department: Vec<(String, f64)> = if table.has_column("treatment_cost") {
        group_rows(table, "department")
            .into_iter()
            .map(|(dept, rows)| (dept, sum_over(table, &rows, "treatment_cost")))
            .collect()
    } else {
        Vec::new()
    };
    revenue_by_department
        .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    SummaryReport {
        total_patients: table.len(),
        total_revenue,
        readmission_rate,
        avg_length_of_stay,
        admissions_by_department,
        outcome_distribution: counts_for(table, "outcome"),
        gender_distribution: counts_for(table, "gender"),
        revenue_by_department,
    }
}

fn counts_for(table: &DataTable, column: &str) -> Vec<(String, usize)> {
    if !table.has_column(column) {
        return Vec::new();
    }
    group_rows(table, column)
        .into_iter()
        .map(|(key, rows)| (key, rows.len()))
        .collect()
}
