//! Gateway webhook intake and log inspection.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::Result;
use crate::metrics::WEBHOOK_EVENTS_TOTAL;
use crate::server::AppState;
use crate::webhook::{event_label, WebhookLogEntry, WebhookLogPage, DEFAULT_LOG_LIMIT};

#[derive(Debug, Default, Deserialize)]
pub struct WebhookLogQuery {
    pub session: Option<String>,
    pub limit: Option<usize>,
}

/// POST /api/v1/webhooks - Record an event from the WhatsApp gateway
#[tracing::instrument(name = "http.receive_webhook", skip(state, body))]
pub async fn receive_webhook(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<WebhookLogEntry>> {
    let event = body.get("event").and_then(|v| v.as_str()).unwrap_or_default();
    let session = body
        .get("session")
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    let entry = state
        .webhook_log
        .add(event, session, body.clone())
        .await?;

    let label = event_label(&entry.event);
    WEBHOOK_EVENTS_TOTAL.with_label_values(&[label]).inc();
    if label == "other" {
        tracing::debug!(event = %entry.event, session = %entry.session, "Unhandled webhook event");
    }
    tracing::info!(event = %entry.event, session = %entry.session, "Webhook received");

    Ok(Json(entry))
}

/// GET /api/v1/webhooks/logs - Recent webhook events
#[tracing::instrument(name = "http.list_webhook_logs", skip(state))]
pub async fn list_webhook_logs(
    State(state): State<AppState>,
    Query(query): Query<WebhookLogQuery>,
) -> Json<WebhookLogPage> {
    let session = query.session.as_deref().filter(|s| !s.is_empty());
    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT);

    Json(state.webhook_log.list(session, limit).await)
}

/// DELETE /api/v1/webhooks/logs - Clear the webhook log
#[tracing::instrument(name = "http.clear_webhook_logs", skip(state))]
pub async fn clear_webhook_logs(State(state): State<AppState>) -> StatusCode {
    state.webhook_log.clear().await;
    StatusCode::NO_CONTENT
}
