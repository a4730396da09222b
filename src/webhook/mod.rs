//! In-memory log of gateway webhook events.
//!
//! Keeps the most recent events newest-first, bounded by `webhook.max_logs`.
//! Used to inspect what the WhatsApp gateway has been sending.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Default page size for [`WebhookLog::list`]
pub const DEFAULT_LOG_LIMIT: usize = 20;

/// Gateway events the service recognises; anything else is reported as `other`
const KNOWN_EVENTS: &[&str] = &["message", "message.ack", "session.status", "state.change"];

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Webhook {0} is required")]
    MissingField(&'static str),
}

/// Bounded label for an event name, safe to use as a metric label.
pub fn event_label(event: &str) -> &'static str {
    KNOWN_EVENTS
        .iter()
        .copied()
        .find(|known| *known == event)
        .unwrap_or("other")
}

/// A received webhook event
#[derive(Debug, Clone, Serialize)]
pub struct WebhookLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub event: String,
    pub session: String,
    pub payload: serde_json::Value,
}

/// A page of webhook log entries
#[derive(Debug, Clone, Serialize)]
pub struct WebhookLogPage {
    pub logs: Vec<WebhookLogEntry>,
    /// Entries matching the session filter, before the limit
    pub total: usize,
    /// Distinct sessions across the whole log, newest first
    pub sessions: Vec<String>,
}

/// Bounded newest-first webhook event log
pub struct WebhookLog {
    entries: RwLock<VecDeque<WebhookLogEntry>>,
    capacity: usize,
}

impl WebhookLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Record an event, evicting the oldest entry when full.
    pub async fn add(
        &self,
        event: &str,
        session: &str,
        payload: serde_json::Value,
    ) -> Result<WebhookLogEntry, WebhookError> {
        if event.trim().is_empty() {
            return Err(WebhookError::MissingField("event"));
        }
        if session.trim().is_empty() {
            return Err(WebhookError::MissingField("session"));
        }

        let entry = WebhookLogEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event: event.to_string(),
            session: session.to_string(),
            payload,
        };

        let mut entries = self.entries.write().await;
        entries.push_front(entry.clone());
        entries.truncate(self.capacity);

        tracing::debug!(
            event = %entry.event,
            session = %entry.session,
            log_size = entries.len(),
            "Webhook event logged"
        );

        Ok(entry)
    }

    /// Most recent entries, optionally for a single session.
    pub async fn list(&self, session: Option<&str>, limit: usize) -> WebhookLogPage {
        let entries = self.entries.read().await;

        let matching: Vec<&WebhookLogEntry> = entries
            .iter()
            .filter(|e| session.map_or(true, |s| e.session == s))
            .collect();

        let mut sessions: Vec<String> = Vec::new();
        for entry in entries.iter() {
            if !sessions.contains(&entry.session) {
                sessions.push(entry.session.clone());
            }
        }

        WebhookLogPage {
            total: matching.len(),
            logs: matching.into_iter().take(limit).cloned().collect(),
            sessions,
        }
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
        tracing::info!("Webhook log cleared");
    }

    /// Number of entries currently held
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Create an Arc-wrapped webhook log
pub fn create_webhook_log(capacity: usize) -> Arc<WebhookLog> {
    Arc::new(WebhookLog::new(capacity))
}
