//! Core record types shared by the store, the API, and the dataset loader.

use serde::{Deserialize, Serialize};

/// One row of the patient fact table.
///
/// Created by the seeding routine or by parsing an upload; immutable
/// thereafter. `id` is the store-assigned sequential identity and is 0
/// until the row has been inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default)]
    pub id: i64,
    pub department: String,
    pub gender: String,
    pub age: i64,
    pub treatment_cost: f64,
    /// "Yes" or "No" in seeded data; uploads may carry anything.
    pub readmission: String,
    pub outcome: String,
}

/// Derived summary numbers served by `GET /kpis`.
///
/// All fields are zero when the store is empty — the readmission-rate
/// division is guarded, never propagated as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_patients: i64,
    pub total_revenue: f64,
    pub readmission_rate: f64,
}

impl Kpis {
    pub fn zero() -> Self {
        Self {
            total_patients: 0,
            total_revenue: 0.0,
            readmission_rate: 0.0,
        }
    }
}

/// A registered account row from the local credential table.
///
/// `password` holds the stored digest, never the cleartext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub password: String,
    pub email: String,
    pub created_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpis_zero_is_all_zero() {
        let k = Kpis::zero();
        assert_eq!(k.total_patients, 0);
        assert_eq!(k.total_revenue, 0.0);
        assert_eq!(k.readmission_rate, 0.0);
    }

    #[test]
    fn patient_record_roundtrips_through_json() {
        let rec = PatientRecord {
            id: 7,
            department: "Cardiology".into(),
            gender: "Female".into(),
            age: 54,
            treatment_cost: 42_000.0,
            readmission: "No".into(),
            outcome: "Recovered".into(),
        };
        let json = serde_json::to_string(&rec).unwrap();
        let back: PatientRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn patient_record_deserializes_without_id() {
        // API pulls and uploads may omit the identity column.
        let json = r#"{"department":"Oncology","gender":"Male","age":61,
                       "treatment_cost":88000.0,"readmission":"Yes","outcome":"Deceased"}"#;
        let rec: PatientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, 0);
        assert_eq!(rec.department, "Oncology");
    }
}
