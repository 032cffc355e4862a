//! Record-serving API binary.
//!
//! Opens (or creates) the patient store, seeds it on first run, and
//! serves `/patients`, `/kpis` and `/health` until interrupted.

use std::process::ExitCode;

use medintel::api::{start_api_server, ApiContext};
use medintel::{config, db};

#[tokio::main]
async fn main() -> ExitCode {
    medintel::init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let db_path = config::records_db_path();
    let conn = db::open_database(&db_path).map_err(|e| e.to_string())?;

    let seeded = db::patients::seed_if_empty(&conn).map_err(|e| e.to_string())?;
    if seeded > 0 {
        tracing::info!(rows = seeded, "seeded empty patient store");
    }

    let addr = config::DEFAULT_API_ADDR
        .parse()
        .map_err(|e| format!("bad listen address: {e}"))?;
    let mut server = start_api_server(ApiContext::new(conn), addr).await?;
    tracing::info!(addr = %server.addr, "serving query API");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("signal handler failed: {e}"))?;
    tracing::info!("interrupt received, shutting down");
    server.shutdown();
    Ok(())
}
