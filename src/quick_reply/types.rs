//! Quick reply types

use serde::{Deserialize, Serialize};

/// A canned fixed-text response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickReply {
    pub id: String,

    pub text: String,

    pub category: String,

    /// Optional keyword such as `/thanks`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,

    #[serde(default)]
    pub usage: u64,
}

/// Request to create a new quick reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuickReplyRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: String,
    pub shortcut: Option<String>,
}

impl CreateQuickReplyRequest {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            shortcut: None,
        }
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }
}

/// Partial update of a quick reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuickReplyRequest {
    pub text: Option<String>,
    pub category: Option<String>,
    /// Shortcut keyword (optional, use null to clear)
    #[serde(default, deserialize_with = "double_option")]
    pub shortcut: Option<Option<String>>,
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Response for listing quick replies
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReplyListResponse {
    pub quick_replies: Vec<QuickReply>,
    pub categories: Vec<String>,
    pub total: usize,
}
