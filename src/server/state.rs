use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::quick_reply::{create_quick_reply_store, QuickReplyStore};
use crate::storage::{create_document_backend, DocumentBackend};
use crate::template::{create_template_store, TemplateResult, TemplateStore};
use crate::webhook::{create_webhook_log, WebhookLog};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub template_store: Arc<TemplateStore>,
    pub quick_reply_store: Arc<QuickReplyStore>,
    pub webhook_log: Arc<WebhookLog>,
    pub storage_backend: &'static str,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let backend = create_document_backend(&settings.storage);
        Self::with_backend(settings, backend)
    }

    /// Build state over an explicit document backend
    pub fn with_backend(settings: Settings, backend: Arc<dyn DocumentBackend>) -> Self {
        let webhook_log = create_webhook_log(settings.webhook.max_logs);

        Self {
            storage_backend: backend.name(),
            template_store: create_template_store(backend.clone()),
            quick_reply_store: create_quick_reply_store(backend),
            webhook_log,
            settings: Arc::new(settings),
            started_at: Instant::now(),
        }
    }

    /// Seed example templates and quick replies into a fresh store.
    pub async fn seed_defaults(&self) -> TemplateResult<()> {
        let templates = self.template_store.seed_defaults().await?;
        let replies = self.quick_reply_store.seed_defaults().await?;

        tracing::info!(
            templates = templates,
            quick_replies = replies,
            "Default data seeding finished"
        );
        Ok(())
    }
}
