//! Patient record repository and the query service over it.
//!
//! The table is queried in full on every request — there is no pagination
//! and no filtering at this layer. `seed_if_empty` populates an empty
//! store with synthetic rows on first startup.

use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::{params, Connection};

use super::DatabaseError;
use crate::config;
use crate::models::{Kpis, PatientRecord};

const DEPARTMENTS: [&str; 4] = ["Cardiology", "Neurology", "Orthopedics", "Oncology"];
const GENDERS: [&str; 2] = ["Male", "Female"];
const OUTCOMES: [&str; 2] = ["Recovered", "Deceased"];
const READMISSION: [&str; 2] = ["Yes", "No"];

/// Inserts a single record, returning its assigned id.
pub fn insert_patient(conn: &Connection, rec: &PatientRecord) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (department, gender, age, treatment_cost, readmission, outcome)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            rec.department,
            rec.gender,
            rec.age,
            rec.treatment_cost,
            rec.readmission,
            rec.outcome,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Number of rows in the store.
pub fn count_patients(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    Ok(count)
}

/// All patient rows, in insertion order.
pub fn list_patients(conn: &Connection) -> Result<Vec<PatientRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, department, gender, age, treatment_cost, readmission, outcome
         FROM patients ORDER BY id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(PatientRecord {
            id: row.get(0)?,
            department: row.get(1)?,
            gender: row.get(2)?,
            age: row.get(3)?,
            treatment_cost: row.get(4)?,
            readmission: row.get(5)?,
            outcome: row.get(6)?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Computes the dashboard KPIs in a single aggregate query.
///
/// An empty store yields all-zero KPIs; the readmission-rate division is
/// guarded rather than propagated.
pub fn compute_kpis(conn: &Connection) -> Result<Kpis, DatabaseError> {
    let (total, revenue, readmitted): (i64, Option<f64>, i64) = conn.query_row(
        "SELECT COUNT(*), SUM(treatment_cost),
                COUNT(*) FILTER (WHERE readmission = 'Yes')
         FROM patients",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    if total == 0 {
        return Ok(Kpis::zero());
    }

    Ok(Kpis {
        total_patients: total,
        total_revenue: revenue.unwrap_or(0.0),
        readmission_rate: 100.0 * readmitted as f64 / total as f64,
    })
}

/// Populates an empty store with synthetic rows on first startup.
///
/// Returns the number of rows inserted (0 when the store already has data).
pub fn seed_if_empty(conn: &Connection) -> Result<usize, DatabaseError> {
    if count_patients(conn)? > 0 {
        return Ok(0);
    }

    let mut rng = rand::thread_rng();
    let n = config::SEED_ROW_COUNT;
    tracing::info!("Seeding patient store with {n} synthetic records");

    for _ in 0..n {
        let rec = PatientRecord {
            id: 0,
            department: (*DEPARTMENTS.choose(&mut rng).unwrap()).to_string(),
            gender: (*GENDERS.choose(&mut rng).unwrap()).to_string(),
            age: rng.gen_range(20..=80),
            treatment_cost: rng.gen_range(10_000..=100_000) as f64,
            readmission: (*READMISSION.choose(&mut rng).unwrap()).to_string(),
            outcome: (*OUTCOMES.choose(&mut rng).unwrap()).to_string(),
        };
        insert_patient(conn, &rec)?;
    }

    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn record(department: &str, cost: f64, readmission: &str) -> PatientRecord {
        PatientRecord {
            id: 0,
            department: department.into(),
            gender: "Female".into(),
            age: 40,
            treatment_cost: cost,
            readmission: readmission.into(),
            outcome: "Recovered".into(),
        }
    }

    #[test]
    fn kpis_on_empty_store_are_zero() {
        let conn = open_memory_database().unwrap();
        let kpis = compute_kpis(&conn).unwrap();
        assert_eq!(kpis, Kpis::zero());
    }

    #[test]
    fn kpis_readmission_rate_exact() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &record("Cardiology", 100.0, "Yes")).unwrap();
        insert_patient(&conn, &record("Cardiology", 200.0, "No")).unwrap();
        insert_patient(&conn, &record("Neurology", 300.0, "No")).unwrap();
        insert_patient(&conn, &record("Oncology", 400.0, "Yes")).unwrap();

        let kpis = compute_kpis(&conn).unwrap();
        assert_eq!(kpis.total_patients, 4);
        assert_eq!(kpis.total_revenue, 1000.0);
        assert_eq!(kpis.readmission_rate, 100.0 * 2.0 / 4.0);
    }

    #[test]
    fn seed_fills_empty_store_once() {
        let conn = open_memory_database().unwrap();
        let inserted = seed_if_empty(&conn).unwrap();
        assert_eq!(inserted, crate::config::SEED_ROW_COUNT);
        assert_eq!(
            count_patients(&conn).unwrap(),
            crate::config::SEED_ROW_COUNT as i64
        );

        // Second call is a no-op.
        assert_eq!(seed_if_empty(&conn).unwrap(), 0);
    }

    #[test]
    fn seeded_rows_stay_in_documented_ranges() {
        let conn = open_memory_database().unwrap();
        seed_if_empty(&conn).unwrap();
        for rec in list_patients(&conn).unwrap() {
            assert!((20..=80).contains(&rec.age));
            assert!((10_000.0..=100_000.0).contains(&rec.treatment_cost));
            assert!(DEPARTMENTS.contains(&rec.department.as_str()));
            assert!(READMISSION.contains(&rec.readmission.as_str()));
        }
    }

    #[test]
    fn list_returns_rows_with_sequential_ids() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &record("Cardiology", 10.0, "No")).unwrap();
        insert_patient(&conn, &record("Neurology", 20.0, "No")).unwrap();

        let rows = list_patients(&conn).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[1].id, 2);
        assert_eq!(rows[1].department, "Neurology");
    }
}
