use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "MedIntel";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address for the record-serving API.
pub const DEFAULT_API_ADDR: &str = "127.0.0.1:8000";

/// Base URL the dataset loader pulls from when no override is given.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Fixed timeout for API pulls. On failure the caller reports the error
/// and falls back to "no data" — there is no retry or backoff.
pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Number of synthetic patient rows inserted when the store is empty.
pub const SEED_ROW_COUNT: usize = 500;

/// Fixed seed for the forecast jitter. The projection is a placeholder
/// heuristic, not a trained model; the seed keeps it reproducible.
pub const FORECAST_SEED: u64 = 42;

/// Bounds of the multiplicative forecast jitter (8%-25% growth).
pub const FORECAST_GROWTH_MIN: f64 = 1.08;
pub const FORECAST_GROWTH_MAX: f64 = 1.25;

pub fn default_log_filter() -> String {
    "info,medintel=debug".to_string()
}

/// Get the application data directory
/// ~/MedIntel/ on all platforms (user-visible by design)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("MedIntel")
}

/// Path of the patient record store.
pub fn records_db_path() -> PathBuf {
    app_data_dir().join("records.db")
}

/// Path of the local credential table.
pub fn users_db_path() -> PathBuf {
    app_data_dir().join("users.db")
}

/// Directory report exports are written to.
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}
