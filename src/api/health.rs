//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub storage: StorageHealthResponse,
    /// Entries currently held in the webhook log
    pub webhook_events: usize,
}

#[derive(Debug, Serialize)]
pub struct StorageHealthResponse {
    pub backend: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<usize>,
}

/// GET /health - Service health with storage status
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let templates = state.template_store.count().await;
    let quick_replies = state.quick_reply_store.count().await;

    let healthy = templates.is_ok() && quick_replies.is_ok();
    if let Err(e) = &templates {
        tracing::warn!(error = %e, "Template store unhealthy");
    }
    if let Err(e) = &quick_replies {
        tracing::warn!(error = %e, "Quick reply store unhealthy");
    }

    Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        storage: StorageHealthResponse {
            backend: state.storage_backend.to_string(),
            healthy,
            templates: templates.ok(),
            quick_replies: quick_replies.ok(),
        },
        webhook_events: state.webhook_log.len().await,
    })
}
