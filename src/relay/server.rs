//! The relay HTTP server.
//!
//! Three routes over one injected [`SnapshotStore`]:
//!
//! - `POST /export` — parse the body as JSON, replace the slot, `{success:true}`;
//!   malformed JSON gets a 400 and leaves the slot unchanged.
//! - `GET /import` — echo the held blob, or 404 when the slot is empty.
//!   Retrieval does not clear the slot.
//! - `GET /status` — whether a snapshot is held, plus the current time.
//!
//! CORS is wide open (any origin, GET/POST/OPTIONS, Content-Type) so a
//! browser extension can call the relay cross-origin. Acceptable only
//! because the relay binds to localhost for a single trusted user.

use std::net::SocketAddr;

use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use super::store::SnapshotStore;
use crate::error::{Result, TtError};

/// Default relay port, shared with the browser extension.
pub const DEFAULT_PORT: u16 = 7878;

/// Build the relay router around an injected store.
pub fn router(store: SnapshotStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/export", post(store_snapshot))
        .route("/import", get(fetch_snapshot))
        .route("/status", get(status))
        .fallback(not_found)
        .layer(cors)
        .with_state(store)
}

/// A bound relay ready to run.
///
/// Binding and running are split so callers (and tests) can learn the local
/// address before the server starts accepting requests.
pub struct Relay {
    listener: tokio::net::TcpListener,
    router: Router,
}

impl Relay {
    /// Bind the relay to `addr` around an injected store.
    pub async fn bind(store: SnapshotStore, addr: SocketAddr) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| TtError::RelayBindFailed {
                addr: addr.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            listener,
            router: router(store),
        })
    }

    /// The address the relay actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let addr = self.listener.local_addr()?;
        info!(%addr, "relay listening");
        info!("endpoints: POST /export, GET /import, GET /status");

        axum::serve(self.listener, self.router)
            .await
            .map_err(|e| TtError::Other(format!("relay server error: {e}")))
    }
}

/// Bind and run the relay until the process is stopped.
pub async fn serve(store: SnapshotStore, addr: SocketAddr) -> Result<()> {
    Relay::bind(store, addr).await?.run().await
}

/// POST /export — store a snapshot blob.
async fn store_snapshot(
    State(store): State<SnapshotStore>,
    body: String,
) -> (StatusCode, Json<Value>) {
    match serde_json::from_str::<Value>(&body) {
        Ok(snapshot) => {
            log_received(&snapshot);
            store.replace(snapshot);
            (
                StatusCode::OK,
                Json(json!({ "success": true, "message": "Tabs exported" })),
            )
        }
        Err(e) => {
            warn!(error = %e, "rejecting malformed export body");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
        }
    }
}

/// GET /import — echo the held snapshot.
async fn fetch_snapshot(State(store): State<SnapshotStore>) -> (StatusCode, Json<Value>) {
    match store.current() {
        Some(snapshot) => {
            info!("serving held snapshot");
            (
                StatusCode::OK,
                Json(json!({ "success": true, "data": snapshot })),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "No tab data available" })),
        ),
    }
}

/// GET /status — liveness and slot occupancy.
async fn status(State(store): State<SnapshotStore>) -> Json<Value> {
    Json(json!({
        "status": "running",
        "hasData": store.has_data(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Best-effort window/tab counts for the store log line; payloads that are
/// not snapshot-shaped are stored anyway.
fn log_received(snapshot: &Value) {
    let windows = snapshot
        .get("windows")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    let tabs: usize = snapshot
        .get("windows")
        .and_then(Value::as_array)
        .map(|ws| {
            ws.iter()
                .filter_map(|w| w.get("tabs").and_then(Value::as_array).map(Vec::len))
                .sum()
        })
        .unwrap_or(0);
    info!(windows, tabs, "received tab data");
}
