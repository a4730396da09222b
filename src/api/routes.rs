use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

use super::health::health;
use super::message::{clean_message, extract_message_mentions, format_message, validate_message};
use super::metrics::prometheus_metrics;
use super::quick_reply::{
    create_quick_reply, delete_quick_reply, get_quick_reply, increment_quick_reply_usage,
    list_quick_replies, update_quick_reply,
};
use super::template::{
    create_template, delete_template, get_template, increment_template_usage, list_templates,
    preview_template, process_template, update_template,
};
use super::webhook::{clear_webhook_logs, list_webhook_logs, receive_webhook};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .nest(
            "/api/v1",
            Router::new()
                // Templates
                .route("/templates", get(list_templates).post(create_template))
                .route(
                    "/templates/{id}",
                    get(get_template).put(update_template).delete(delete_template),
                )
                .route("/templates/{id}/process", post(process_template))
                .route("/templates/{id}/preview", get(preview_template))
                .route("/templates/{id}/usage", post(increment_template_usage))
                // Quick replies
                .route(
                    "/quick-replies",
                    get(list_quick_replies).post(create_quick_reply),
                )
                .route(
                    "/quick-replies/{id}",
                    get(get_quick_reply)
                        .put(update_quick_reply)
                        .delete(delete_quick_reply),
                )
                .route("/quick-replies/{id}/usage", post(increment_quick_reply_usage))
                // Message formatting
                .route("/messages/validate", post(validate_message))
                .route("/messages/format", post(format_message))
                .route("/messages/clean", post(clean_message))
                .route("/messages/mentions", post(extract_message_mentions))
                // Gateway webhooks
                .route("/webhooks", post(receive_webhook))
                .route(
                    "/webhooks/logs",
                    get(list_webhook_logs).delete(clear_webhook_logs),
                ),
        )
}
