//! Message formatting endpoints.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::formatter::{self, FormatKind, FormattedMessage, ShortcutResult};
use crate::metrics::MESSAGES_VALIDATED_TOTAL;

#[derive(Debug, Deserialize)]
pub struct ValidateMessageRequest {
    pub text: String,
    /// Known contact identifiers; mentions outside this list are reported
    pub mentions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct FormatMessageRequest {
    pub text: String,
    pub kind: FormatKind,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TextBody {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MentionsResponse {
    pub mentions: Vec<String>,
}

/// POST /api/v1/messages/validate - Validate and preview a message
#[tracing::instrument(name = "http.validate_message", skip(request))]
pub async fn validate_message(
    Json(request): Json<ValidateMessageRequest>,
) -> Json<FormattedMessage> {
    let result = formatter::validate(&request.text, request.mentions.as_deref());

    let label = if result.is_valid { "valid" } else { "invalid" };
    MESSAGES_VALIDATED_TOTAL.with_label_values(&[label]).inc();

    Json(result)
}

/// POST /api/v1/messages/format - Apply formatting to a selection
#[tracing::instrument(name = "http.format_message", skip(request), fields(kind = ?request.kind))]
pub async fn format_message(Json(request): Json<FormatMessageRequest>) -> Json<ShortcutResult> {
    Json(formatter::apply_shortcut(
        &request.text,
        request.start,
        request.end,
        request.kind,
    ))
}

/// POST /api/v1/messages/clean - Normalise whitespace before sending
#[tracing::instrument(name = "http.clean_message", skip(request))]
pub async fn clean_message(Json(request): Json<TextBody>) -> Json<TextBody> {
    Json(TextBody {
        text: formatter::clean_for_sending(&request.text),
    })
}

/// POST /api/v1/messages/mentions - Extract mentions as chat identifiers
#[tracing::instrument(name = "http.extract_mentions", skip(request))]
pub async fn extract_message_mentions(Json(request): Json<TextBody>) -> Json<MentionsResponse> {
    Json(MentionsResponse {
        mentions: formatter::extract_mentions(&request.text),
    })
}
