//! Message template system.
//!
//! This module provides:
//! - Template definition with variable placeholders (`{{variable}}`)
//! - Persistent template storage with CRUD, search and usage tracking
//! - Variable substitution with a missing-variable report
//!
//! # Example
//!
//! ```ignore
//! let store = TemplateStore::new(backend);
//!
//! let template = store
//!     .create(CreateTemplateRequest::new("Greet", "Greetings", "Hi {{name}}"))
//!     .await?;
//! assert_eq!(template.variables, vec!["name"]);
//!
//! let mut vars = HashMap::new();
//! vars.insert("name".to_string(), "Ann".to_string());
//! let rendered = render(&template, &vars);
//! assert_eq!(rendered.processed, "Hi Ann");
//! ```

mod defaults;
mod store;
mod types;
mod variables;

pub(crate) use store::require;
pub use store::{create_template_store, TemplateStore, TEMPLATES_DOCUMENT};
pub use types::{
    CreateTemplateRequest, MessageTemplate, ProcessedTemplate, TemplateError,
    TemplateListResponse, TemplatePreview, TemplateResult, UpdateTemplateRequest,
};
pub use variables::{
    extract_variables, missing_variables, preview, process_template, render, sample_variables,
};
