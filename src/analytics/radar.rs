//! Department performance view: per-department metrics normalized onto a
//! 0-100 scale for the radar display, plus the raw performance table.

use serde::Serialize;

use super::{group_rows, mean_over, require_columns, sum_over, ViewError};
use crate::dataset::DataTable;

#[derive(Debug, Clone, Serialize)]
pub struct RadarAxes {
    pub department: String,
    /// Mean age relative to the highest-mean-age department.
    pub age_index: f64,
    /// Inverted cost scale: the cheapest department scores highest.
    pub cost_efficiency: f64,
    /// Patient count relative to the busiest department.
    pub patient_volume: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentPerformance {
    pub department: String,
    pub patients: usize,
    pub avg_age: Option<f64>,
    pub avg_cost: Option<f64>,
    pub total_revenue: f64,
    /// Percentage of the department's rows with readmission == "Yes";
    /// `None` without a readmission column.
    pub readmission_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarReport {
    pub axes: Vec<RadarAxes>,
    /// Sorted by patient count, largest first.
    pub performance: Vec<DepartmentPerformance>,
}

/// Requires `department`; age, cost, and readmission metrics degrade to
/// zero/`None` when their columns are absent.
pub fn department_radar(table: &DataTable) -> Result<RadarReport, ViewError> {
    require_columns(table, &["department"])?;

    let by_department = group_rows(table, "department");

    let mut performance: Vec<DepartmentPerformance> = by_department
        .iter()
        .map(|(department, rows)| {
            let readmission_rate = if table.has_column("readmission") {
                let yes = rows
                    .iter()
                    .filter(|&&r| table.text(r, "readmission").as_deref() == Some("Yes"))
                    .count();
                Some(100.0 * yes as f64 / rows.len() as f64)
            } else {
                None
            };
            DepartmentPerformance {
                department: department.clone(),
                patients: rows.len(),
                avg_age: mean_over(table, rows, "age"),
                avg_cost: mean_over(table, rows, "treatment_cost"),
                total_revenue: sum_over(table, rows, "treatment_cost"),
                readmission_rate,
            }
        })
        .collect();

    let max_age = performance
        .iter()
        .filter_map(|p| p.avg_age)
        .fold(0.0, f64::max);
    let max_cost = performance
        .iter()
        .filter_map(|p| p.avg_cost)
        .fold(0.0, f64::max);
    let max_volume = performance.iter().map(|p| p.patients).max().unwrap_or(0);

    let axes = performance
        .iter()
        .map(|p| RadarAxes {
            department: p.department.clone(),
            age_index: normalize(p.avg_age, max_age),
            cost_efficiency: match p.avg_cost {
                Some(_) if max_cost > 0.0 => 100.0 - normalize(p.avg_cost, max_cost),
                _ => 0.0,
            },
            patient_volume: if max_volume > 0 {
                100.0 * p.patients as f64 / max_volume as f64
            } else {
                0.0
            },
        })
        .collect();

    performance.sort_by(|a, b| b.patients.cmp(&a.patients).then(a.department.cmp(&b.department)));

    Ok(RadarReport { axes, performance })
}

fn normalize(value: Option<f64>, max: f64) -> f64 {
    match value {
        Some(v) if max > 0.0 => 100.0 * v / max,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        DataTable::from_csv(
            "department,age,treatment_cost,readmission\n\
             Cardiology,60,100,Yes\n\
             Cardiology,40,300,No\n\
             Neurology,25,500,No\n"
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn axes_normalized_to_100_scale() {
        let report = department_radar(&table()).unwrap();
        let cardio = report
            .axes
            .iter()
            .find(|a| a.department == "Cardiology")
            .unwrap();
        // Cardiology mean age 50 vs max 50 → 100; mean cost 200 vs max 500.
        assert!((cardio.age_index - 100.0).abs() < 1e-9);
        assert!((cardio.cost_efficiency - (100.0 - 100.0 * 200.0 / 500.0)).abs() < 1e-9);
        assert!((cardio.patient_volume - 100.0).abs() < 1e-9);

        let neuro = report
            .axes
            .iter()
            .find(|a| a.department == "Neurology")
            .unwrap();
        // Most expensive department scores zero efficiency.
        assert!((neuro.cost_efficiency - 0.0).abs() < 1e-9);
        assert!((neuro.patient_volume - 50.0).abs() < 1e-9);
    }

    #[test]
    fn performance_sorted_by_volume_with_readmission() {
        let report = department_radar(&table()).unwrap();
        assert_eq!(report.performance[0].department, "Cardiology");
        assert_eq!(report.performance[0].patients, 2);
        assert_eq!(report.performance[0].readmission_rate, Some(50.0));
        assert_eq!(report.performance[0].total_revenue, 400.0);
        assert_eq!(report.performance[1].readmission_rate, Some(0.0));
    }

    #[test]
    fn degrades_without_optional_columns() {
        let t = DataTable::from_csv("department\nCardiology\n".as_bytes()).unwrap();
        let report = department_radar(&t).unwrap();
        assert_eq!(report.performance[0].avg_age, None);
        assert_eq!(report.performance[0].readmission_rate, None);
        assert_eq!(report.axes[0].age_index, 0.0);
        assert_eq!(report.axes[0].cost_efficiency, 0.0);
    }

    #[test]
    fn missing_department_column_is_a_view_error() {
        let t = DataTable::from_csv("age\n40\n".as_bytes()).unwrap();
        assert!(department_radar(&t).is_err());
    }

    #[test]
    fn empty_dataset_yields_empty_report() {
        let t = DataTable::from_csv("department\n".as_bytes()).unwrap();
        let report = department_radar(&t).unwrap();
        assert!(report.axes.is_empty());
        assert!(report.performance.is_empty());
    }
}
