//! Formatter input and result types

use serde::{Deserialize, Serialize};

/// Inline formatting applied to a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Bold,
    Italic,
    Strikethrough,
    Code,
    /// Mentions are inserted by the caller; formatting leaves the text alone
    Mention,
}

/// A formatting request over the character range `start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FormatAction {
    pub kind: FormatKind,
    pub start: usize,
    pub end: usize,
}

/// Validation result for a message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedMessage {
    pub text: String,
    /// HTML rendering of `text`
    pub preview: String,
    pub is_valid: bool,
    pub character_count: usize,
    pub errors: Vec<String>,
}

/// Text and selection after applying a formatting shortcut
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutResult {
    pub new_text: String,
    pub new_selection_start: usize,
    pub new_selection_end: usize,
}
