//! Template types and error definitions

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StorageError;

/// Error type shared by template and quick reply operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// A stored message body with `{{variable}}` placeholders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplate {
    /// Unique template identifier
    pub id: String,

    /// Display label
    pub name: String,

    /// Free-text grouping label
    pub category: String,

    /// Template body
    pub content: String,

    /// Distinct placeholder names in first-occurrence order, derived from `content`
    pub variables: Vec<String>,

    /// Number of times the template has been used
    #[serde(default)]
    pub usage: u64,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new template
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTemplateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub content: String,
}

impl CreateTemplateRequest {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            content: content.into(),
        }
    }
}

/// Partial update of an existing template. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    /// New body; the variable list is recomputed from it
    pub content: Option<String>,
}

/// Response for listing templates
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<MessageTemplate>,

    /// Every category in the store, sorted
    pub categories: Vec<String>,

    pub total: usize,
}

/// Result of substituting variables into a template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedTemplate {
    pub processed: String,
    pub original: String,
    pub variables: Vec<String>,
    pub missing_variables: Vec<String>,
    pub all_variables_provided: bool,
}

/// Template rendered with sample values for preview
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    pub content: String,
    pub preview: String,
    pub variables: Vec<String>,
    pub sample_variables: HashMap<String, String>,
    pub has_variables: bool,
}
