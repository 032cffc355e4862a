//! API endpoint handlers.

pub mod health;
pub mod kpis;
pub mod patients;
