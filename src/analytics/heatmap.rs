//! Financial view: average treatment cost across department × gender
//! cells, the revenue ranking, and age-group breakdowns.

use serde::Serialize;

use super::{group_rows, mean_over, require_columns, sum_over, ViewError};
use crate::dataset::DataTable;

/// Age buckets used by the financial breakdown.
const AGE_BUCKETS: [(&str, f64, f64); 5] = [
    ("<18", 0.0, 18.0),
    ("18-35", 18.0, 35.0),
    ("35-50", 35.0, 50.0),
    ("50-65", 50.0, 65.0),
    ("65+", 65.0, f64::MAX),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub department: String,
    pub gender: String,
    pub avg_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostSummary {
    pub total: f64,
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgeGroupStats {
    pub label: String,
    pub patients: usize,
    pub avg_cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapReport {
    pub cost_summary: CostSummary,
    /// Empty when the dataset has no `gender` column.
    pub cells: Vec<HeatmapCell>,
    /// (department, total revenue), largest first.
    pub revenue_by_department: Vec<(String, f64)>,
    /// Empty when the dataset has no `age` column.
    pub age_groups: Vec<AgeGroupStats>,
}

/// Requires `department` and `treatment_cost`; the gender heatmap and the
/// age breakdown are produced only when those columns exist.
pub fn cost_heatmap(table: &DataTable) -> Result<HeatmapReport, ViewError> {
    require_columns(table, &["department", "treatment_cost"])?;

    let costs: Vec<f64> = (0..table.len())
        .filter_map(|r| table.number(r, "treatment_cost"))
        .collect();
    let total: f64 = costs.iter().sum();
    let cost_summary = if costs.is_empty() {
        CostSummary {
            total: 0.0,
            average: 0.0,
            minimum: 0.0,
            maximum: 0.0,
        }
    } else {
        CostSummary {
            total,
            average: total / costs.len() as f64,
            minimum: costs.iter().cloned().fold(f64::INFINITY, f64::min),
            maximum: costs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        }
    };

    let by_department = group_rows(table, "department");

    let mut cells = Vec::new();
    if table.has_column("gender") {
        for (department, rows) in &by_department {
            let mut by_gender = std::collections::BTreeMap::<String, Vec<usize>>::new();
            for &r in rows {
                if let Some(g) = table.text(r, "gender") {
                    by_gender.entry(g).or_default().push(r);
                }
            }
            for (gender, grows) in by_gender {
                if let Some(avg_cost) = mean_over(table, &grows, "treatment_cost") {
                    cells.push(HeatmapCell {
                        department: department.clone(),
                        gender,
                        avg_cost,
                    });
                }
            }
        }
    }

    let mut revenue_by_department: Vec<(String, f64)> = by_department
        .iter()
        .map(|(dept, rows)| (dept.clone(), sum_over(table, rows, "treatment_cost")))
        .collect();
    revenue_by_department
        .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut age_groups = Vec::new();
    if table.has_column("age") {
        for (label, low, high) in AGE_BUCKETS {
            let rows: Vec<usize> = (0..table.len())
                .filter(|&r| {
                    table
                        .number(r, "age")
                        .is_some_and(|a| a >= low && a < high)
                })
                .collect();
            age_groups.push(AgeGroupStats {
                label: label.to_string(),
                patients: rows.len(),
                avg_cost: mean_over(table, &rows, "treatment_cost"),
            });
        }
    }

    Ok(HeatmapReport {
        cost_summary,
        cells,
        revenue_by_department,
        age_groups,
    })
}
