//! API layer - HTTP endpoint handlers organized by domain.

mod health;
mod message;
mod metrics;
mod quick_reply;
mod routes;
mod template;
mod webhook;

// Re-export all handlers for use in server/app.rs
pub use health::health;
pub use message::{clean_message, extract_message_mentions, format_message, validate_message};
pub use metrics::prometheus_metrics;
pub use quick_reply::{
    create_quick_reply, delete_quick_reply, get_quick_reply, increment_quick_reply_usage,
    list_quick_replies, update_quick_reply,
};
pub use routes::api_routes;
pub use template::{
    create_template, delete_template, get_template, increment_template_usage, list_templates,
    preview_template, process_template, update_template,
};
pub use webhook::{clear_webhook_logs, list_webhook_logs, receive_webhook};
