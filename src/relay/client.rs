//! Blocking HTTP client for the relay.
//!
//! One local trusted caller, one request at a time. No request timeout is
//! configured: a hung relay connection hangs the calling operation, matching
//! the tool this replaces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TtError};
use crate::snapshot::TabSnapshot;

/// Where the relay lives unless told otherwise.
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:7878";

/// Response of `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayStatus {
    pub status: String,
    #[serde(rename = "hasData")]
    pub has_data: bool,
    pub timestamp: DateTime<Utc>,
}

/// Envelope every relay endpoint wraps its response in.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Blocking client for the relay's three endpoints.
pub struct RelayClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl RelayClient {
    /// Create a client for the relay at `base_url` (no trailing slash).
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which
    /// only happens when the TLS backend is unavailable.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let http = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .expect("failed to build HTTP client");
        Self { base_url, http }
    }

    /// The relay URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store a snapshot on the relay (`POST /export`).
    pub fn export(&self, snapshot: &TabSnapshot) -> Result<()> {
        let url = format!("{}/export", self.base_url);
        debug!(%url, tabs = snapshot.total_tabs(), "sending snapshot");

        let response = self
            .http
            .post(&url)
            .json(snapshot)
            .send()
            .map_err(|e| self.offline(e))?;

        let status = response.status();
        let envelope: ApiEnvelope = response
            .json()
            .map_err(|e| TtError::SnapshotParse(e.to_string()))?;

        if status.is_success() && envelope.success {
            debug!(message = envelope.message.as_deref(), "relay accepted export");
            Ok(())
        } else {
            Err(TtError::RelayRejected {
                status: status.as_u16(),
                message: envelope
                    .error
                    .or(envelope.message)
                    .unwrap_or_else(|| "unknown relay error".to_string()),
            })
        }
    }

    /// Fetch the held snapshot (`GET /import`).
    pub fn import(&self) -> Result<TabSnapshot> {
        let url = format!("{}/import", self.base_url);
        debug!(%url, "fetching snapshot");

        let response = self.http.get(&url).send().map_err(|e| self.offline(e))?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TtError::NoSnapshot);
        }

        let envelope: ApiEnvelope = response
            .json()
            .map_err(|e| TtError::SnapshotParse(e.to_string()))?;

        if !status.is_success() || !envelope.success {
            return Err(TtError::RelayRejected {
                status: status.as_u16(),
                message: envelope
                    .error
                    .unwrap_or_else(|| "unknown relay error".to_string()),
            });
        }

        let data = envelope.data.ok_or(TtError::NoSnapshot)?;
        serde_json::from_value(data).map_err(|e| TtError::SnapshotParse(e.to_string()))
    }

    /// Query relay liveness and slot occupancy (`GET /status`).
    pub fn status(&self) -> Result<RelayStatus> {
        let url = format!("{}/status", self.base_url);
        let response = self.http.get(&url).send().map_err(|e| self.offline(e))?;
        response
            .json()
            .map_err(|e| TtError::SnapshotParse(e.to_string()))
    }

    fn offline(&self, error: reqwest::Error) -> TtError {
        TtError::RelayOffline {
            url: self.base_url.clone(),
            reason: error.to_string(),
        }
    }
}

impl Default for RelayClient {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_URL)
    }
}
