//! Patient flow view: the department × outcome matrix behind the flow
//! diagram, plus per-department statistics.

use serde::Serialize;

use super::{group_rows, mean_over, require_columns, ViewError};
use crate::dataset::DataTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowCell {
    pub department: String,
    pub outcome: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentStats {
    pub department: String,
    pub patients: usize,
    pub avg_cost: Option<f64>,
    pub avg_age: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowReport {
    /// Distinct departments, sorted.
    pub departments: Vec<String>,
    /// Distinct outcomes, sorted.
    pub outcomes: Vec<String>,
    /// One cell per (department, outcome) pair that actually occurs.
    pub matrix: Vec<FlowCell>,
    pub department_stats: Vec<DepartmentStats>,
}

/// Requires `department` and `outcome`; cost and age stats are filled in
/// opportunistically when those columns exist.
pub fn flow_matrix(table: &DataTable) -> Result<FlowReport, ViewError> {
    require_columns(table, &["department", "outcome"])?;

    let by_department = group_rows(table, "department");
    let departments: Vec<String> = by_department.keys().cloned().collect();
    let outcomes: Vec<String> = group_rows(table, "outcome").keys().cloned().collect();

    let mut matrix = Vec::new();
    for (department, rows) in &by_department {
        for outcome in &outcomes {
            let count = rows
                .iter()
                .filter(|&&r| table.text(r, "outcome").as_deref() == Some(outcome))
                .count();
            if count > 0 {
                matrix.push(FlowCell {
                    department: department.clone(),
                    outcome: outcome.clone(),
                    count,
                });
            }
        }
    }

    let department_stats = by_department
        .iter()
        .map(|(department, rows)| DepartmentStats {
            department: department.clone(),
            patients: rows.len(),
            avg_cost: mean_over(table, rows, "treatment_cost"),
            avg_age: mean_over(table, rows, "age"),
        })
        .collect();

    Ok(FlowReport {
        departments,
        outcomes,
        matrix,
        department_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        DataTable::from_csv(
            "department,outcome,treatment_cost,age\n\
             Cardiology,Recovered,100,60\n\
             Cardiology,Recovered,200,50\n\
             Cardiology,Deceased,300,70\n\
             Neurology,Recovered,50,30\n"
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn matrix_counts_each_pair() {
        let report = flow_matrix(&table()).unwrap();
        assert_eq!(report.departments, vec!["Cardiology", "Neurology"]);
        assert_eq!(report.outcomes, vec!["Deceased", "Recovered"]);
        assert!(report.matrix.contains(&FlowCell {
            department: "Cardiology".into(),
            outcome: "Recovered".into(),
            count: 2,
        }));
        assert!(report.matrix.contains(&FlowCell {
            department: "Neurology".into(),
            outcome: "Recovered".into(),
            count: 1,
        }));
        // Absent pairs are not emitted.
        assert_eq!(report.matrix.len(), 3);
    }

    #[test]
    fn department_stats_average_cost_and_age() {
        let report = flow_matrix(&table()).unwrap();
        let cardio = report
            .department_stats
            .iter()
            .find(|s| s.department == "Cardiology")
            .unwrap();
        assert_eq!(cardio.patients, 3);
        assert_eq!(cardio.avg_cost, Some(200.0));
        assert_eq!(cardio.avg_age, Some(60.0));
    }

    #[test]
    fn missing_columns_reported_not_panicked() {
        let sparse = DataTable::from_csv("department\nCardiology\n".as_bytes()).unwrap();
        let err = flow_matrix(&sparse).unwrap_err();
        assert!(matches!(
            err,
            ViewError::MissingColumns { ref missing, .. } if missing == &["outcome"]
        ));
    }

    #[test]
    fn empty_dataset_gives_empty_report() {
        let empty = DataTable::from_csv("department,outcome\n".as_bytes()).unwrap();
        let report = flow_matrix(&empty).unwrap();
        assert!(report.matrix.is_empty());
        assert!(report.department_stats.is_empty());
    }

    #[test]
    fn stats_degrade_without_cost_column() {
        let t = DataTable::from_csv("department,outcome\nCardiology,Recovered\n".as_bytes())
            .unwrap();
        let report = flow_matrix(&t).unwrap();
        assert_eq!(report.department_stats[0].avg_cost, None);
    }
}
