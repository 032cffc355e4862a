//! Query API server lifecycle.
//!
//! Pattern: bind → spawn background task → return handle with shutdown
//! channel. The handle owns the shutdown sender; dropping it without
//! calling `shutdown` leaves the server running until the runtime stops.

use std::net::SocketAddr;

use tokio::sync::oneshot;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

/// Handle to a running query API server.
pub struct ApiServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// Shut down the server gracefully. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("query API shutdown signal sent");
        }
    }
}

/// Binds the query API to `addr` and serves it from a background task.
/// Pass port 0 for an ephemeral port; the bound address is on the handle.
pub async fn start_api_server(ctx: ApiContext, addr: SocketAddr) -> Result<ApiServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind query API server: {e}"))?;
    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    tracing::info!(%addr, "query API binding");

    let app = api_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("query API received shutdown signal");
        };

        tracing::info!(%addr, "query API started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("query API server error: {e}");
        }

        tracing::info!("query API stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn start_seeded() -> ApiServer {
        let conn = db::open_memory_database().unwrap();
        db::patients::seed_if_empty(&conn).unwrap();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        start_api_server(ApiContext::new(conn), addr)
            .await
            .expect("server should start")
    }

    #[tokio::test]
    async fn serves_patients_over_http() {
        let mut server = start_seeded().await;
        let url = format!("http://{}/patients", server.addr);
        let records: Vec<crate::models::PatientRecord> =
            reqwest::get(&url).await.unwrap().json().await.unwrap();
        assert_eq!(records.len(), 500);
        assert!(records.iter().all(|r| (20..=80).contains(&r.age)));
        server.shutdown();
    }

    #[tokio::test]
    async fn serves_kpis_over_http() {
        let mut server = start_seeded().await;
        let url = format!("http://{}/kpis", server.addr);
        let kpis: crate::models::Kpis = reqwest::get(&url).await.unwrap().json().await.unwrap();
        assert_eq!(kpis.total_patients, 500);
        assert!((0.0..=100.0).contains(&kpis.readmission_rate));
        server.shutdown();
    }

    #[tokio::test]
    async fn health_reports_record_count() {
        let mut server = start_seeded().await;
        let url = format!("http://{}/health", server.addr);
        let body: serde_json::Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["patients"], 500);
        server.shutdown();
    }

    #[tokio::test]
    async fn api_client_pulls_from_running_server() {
        let mut server = start_seeded().await;
        let client = crate::client::ApiClient::new(format!("http://{}", server.addr)).unwrap();
        let records = client.fetch_patients().await.unwrap();
        assert_eq!(records.len(), 500);
        let kpis = client.fetch_kpis().await.unwrap();
        assert_eq!(kpis.total_patients, 500);
        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_seeded().await;
        server.shutdown();
        server.shutdown();
    }
}
