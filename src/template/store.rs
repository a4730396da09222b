//! Template storage with CRUD operations

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::storage::{Change, Collection, DocumentBackend};

use super::defaults::default_templates;
use super::types::{
    CreateTemplateRequest, MessageTemplate, TemplateError, TemplateResult, UpdateTemplateRequest,
};
use super::variables::extract_variables;

/// Document name for the templates collection
pub const TEMPLATES_DOCUMENT: &str = "templates";

/// Persistent message template storage
pub struct TemplateStore {
    templates: Collection<MessageTemplate>,
}

impl TemplateStore {
    /// Create a template store over the given backend
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            templates: Collection::new(backend, TEMPLATES_DOCUMENT),
        }
    }

    /// Write the example templates if the store has never been written.
    ///
    /// Returns the number of templates seeded.
    pub async fn seed_defaults(&self) -> TemplateResult<usize> {
        let defaults = default_templates();
        let count = defaults.len();

        if self.templates.initialize(defaults).await? {
            tracing::info!(count, "Seeded default templates");
            Ok(count)
        } else {
            Ok(0)
        }
    }

    /// List all templates
    pub async fn load_all(&self) -> TemplateResult<Vec<MessageTemplate>> {
        Ok(self.templates.load().await?)
    }

    /// Get a template by ID
    pub async fn get(&self, id: &str) -> TemplateResult<Option<MessageTemplate>> {
        Ok(self.load_all().await?.into_iter().find(|t| t.id == id))
    }

    /// Create a new template, deriving its variables from the content
    pub async fn create(&self, request: CreateTemplateRequest) -> TemplateResult<MessageTemplate> {
        require("name", &request.name)?;
        require("category", &request.category)?;
        require("content", &request.content)?;

        let now = Utc::now();
        let template = MessageTemplate {
            id: Uuid::new_v4().to_string(),
            variables: extract_variables(&request.content),
            name: request.name,
            category: request.category,
            content: request.content,
            usage: 0,
            created_at: now,
            updated_at: now,
        };

        let created = template.clone();
        self.templates
            .modify(move |templates| {
                templates.push(template);
                Change::Commit(())
            })
            .await?;

        tracing::info!(template_id = %created.id, name = %created.name, "Template created");
        Ok(created)
    }

    /// Update an existing template. Returns `None` if the ID is unknown.
    pub async fn update(
        &self,
        id: &str,
        updates: UpdateTemplateRequest,
    ) -> TemplateResult<Option<MessageTemplate>> {
        if let Some(name) = &updates.name {
            require("name", name)?;
        }
        if let Some(category) = &updates.category {
            require("category", category)?;
        }
        if let Some(content) = &updates.content {
            require("content", content)?;
        }

        let updated = self
            .templates
            .modify(|templates| {
                let Some(template) = templates.iter_mut().find(|t| t.id == id) else {
                    return Change::Discard(None);
                };

                if let Some(name) = updates.name {
                    template.name = name;
                }

                if let Some(category) = updates.category {
                    template.category = category;
                }

                if let Some(content) = updates.content {
                    template.variables = extract_variables(&content);
                    template.content = content;
                }

                template.updated_at = Utc::now();
                Change::Commit(Some(template.clone()))
            })
            .await?;

        if updated.is_some() {
            tracing::info!(template_id = %id, "Template updated");
        }

        Ok(updated)
    }

    /// Delete a template by ID. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> TemplateResult<bool> {
        let removed = self
            .templates
            .modify(|templates| {
                let before = templates.len();
                templates.retain(|t| t.id != id);
                if templates.len() == before {
                    Change::Discard(false)
                } else {
                    Change::Commit(true)
                }
            })
            .await?;

        if removed {
            tracing::info!(template_id = %id, "Template deleted");
        }

        Ok(removed)
    }

    /// Bump the usage counter. Unknown IDs are ignored; returns whether the
    /// template existed.
    pub async fn increment_usage(&self, id: &str) -> TemplateResult<bool> {
        let found = self
            .templates
            .modify(|templates| match templates.iter_mut().find(|t| t.id == id) {
                Some(template) => {
                    template.usage += 1;
                    template.updated_at = Utc::now();
                    Change::Commit(true)
                }
                None => Change::Discard(false),
            })
            .await?;

        if !found {
            tracing::debug!(template_id = %id, "Usage increment for unknown template ignored");
        }

        Ok(found)
    }

    /// Case-insensitive substring search over name, content and category
    pub async fn search(&self, query: &str) -> TemplateResult<Vec<MessageTemplate>> {
        let query = query.to_lowercase();

        Ok(self
            .load_all()
            .await?
            .into_iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&query)
                    || t.content.to_lowercase().contains(&query)
                    || t.category.to_lowercase().contains(&query)
            })
            .collect())
    }

    /// Templates whose category matches exactly
    pub async fn filter_by_category(&self, category: &str) -> TemplateResult<Vec<MessageTemplate>> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .filter(|t| t.category == category)
            .collect())
    }

    /// Distinct categories, sorted
    pub async fn categories(&self) -> TemplateResult<Vec<String>> {
        let categories: BTreeSet<String> = self
            .load_all()
            .await?
            .into_iter()
            .map(|t| t.category)
            .collect();

        Ok(categories.into_iter().collect())
    }

    /// Get the number of templates
    pub async fn count(&self) -> TemplateResult<usize> {
        Ok(self.load_all().await?.len())
    }
}

/// Reject blank required fields
pub(crate) fn require(field: &str, value: &str) -> TemplateResult<()> {
    if value.trim().is_empty() {
        return Err(TemplateError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Create an Arc-wrapped template store
pub fn create_template_store(backend: Arc<dyn DocumentBackend>) -> Arc<TemplateStore> {
    Arc::new(TemplateStore::new(backend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use crate::template::process_template;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn store() -> TemplateStore {
        TemplateStore::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_store_create_greet_scenario() {
        let store = store();

        let created = store
            .create(CreateTemplateRequest::new("Greet", "G", "Hi {{name}}"))
            .await
            .unwrap();
        assert_eq!(created.variables, vec!["name"]);
        assert_eq!(created.usage, 0);

        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Ann".to_string());
        assert_eq!(process_template(&created, &vars), "Hi Ann");

        assert!(store.increment_usage(&created.id).await.unwrap());
        let fetched = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.usage, 1);
    }

    #[tokio::test]
    async fn test_store_create_assigns_unique_ids() {
        let store = store();
        let a = store
            .create(CreateTemplateRequest::new("A", "X", "a"))
            .await
            .unwrap();
        let b = store
            .create(CreateTemplateRequest::new("B", "X", "b"))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_store_create_rejects_missing_fields() {
        let store = store();

        for request in [
            CreateTemplateRequest::new("", "G", "Hi"),
            CreateTemplateRequest::new("Greet", "  ", "Hi"),
            CreateTemplateRequest::new("Greet", "G", ""),
        ] {
            let result = store.create(request).await;
            assert!(matches!(result, Err(TemplateError::Validation(_))));
        }

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_store_get_unknown() {
        let store = store();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_update_recomputes_variables() {
        let store = store();
        let created = store
            .create(CreateTemplateRequest::new("Greet", "G", "Hi {{name}}"))
            .await
            .unwrap();

        let updates = UpdateTemplateRequest {
            content: Some("{{greeting}} {{name}}, {{greeting}}".to_string()),
            ..Default::default()
        };
        let updated = store.update(&created.id, updates).await.unwrap().unwrap();

        assert_eq!(updated.name, "Greet");
        assert_eq!(updated.variables, vec!["greeting", "name"]);
        assert!(updated.updated_at >= created.updated_at);

        let stored = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_store_update_name_keeps_variables() {
        let store = store();
        let created = store
            .create(CreateTemplateRequest::new("Greet", "G", "Hi {{name}}"))
            .await
            .unwrap();

        let updates = UpdateTemplateRequest {
            name: Some("Hello".to_string()),
            category: Some("Greetings".to_string()),
            content: None,
        };
        let updated = store.update(&created.id, updates).await.unwrap().unwrap();

        assert_eq!(updated.name, "Hello");
        assert_eq!(updated.category, "Greetings");
        assert_eq!(updated.variables, vec!["name"]);
    }

    #[tokio::test]
    async fn test_store_update_unknown() {
        let store = store();
        let updates = UpdateTemplateRequest {
            name: Some("New".to_string()),
            ..Default::default()
        };
        assert!(store.update("missing", updates).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_update_rejects_blank_fields() {
        let store = store();
        let created = store
            .create(CreateTemplateRequest::new("Greet", "G", "Hi"))
            .await
            .unwrap();

        let updates = UpdateTemplateRequest {
            content: Some("   ".to_string()),
            ..Default::default()
        };
        assert_err!(store.update(&created.id, updates).await);

        let stored = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.content, "Hi");
    }

    #[tokio::test]
    async fn test_store_delete() {
        let store = store();
        let created = store
            .create(CreateTemplateRequest::new("Greet", "G", "Hi"))
            .await
            .unwrap();

        assert!(assert_ok!(store.delete(&created.id).await));
        assert!(store.get(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_delete_unknown_leaves_store_unchanged() {
        let store = store();
        store.seed_defaults().await.unwrap();
        let before = store.load_all().await.unwrap();

        assert!(!store.delete("unknown").await.unwrap());
        assert_eq!(store.load_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_store_increment_unknown_is_noop() {
        let store = store();
        store.seed_defaults().await.unwrap();
        let before = store.load_all().await.unwrap();

        assert!(!store.increment_usage("unknown").await.unwrap());
        assert_eq!(store.load_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_seed_defaults_once() {
        let store = store();

        assert_eq!(store.seed_defaults().await.unwrap(), 4);
        assert_eq!(store.seed_defaults().await.unwrap(), 0);

        let templates = store.load_all().await.unwrap();
        let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(
            templates[2].variables,
            vec!["orderNumber", "amount", "address", "deliveryDate"]
        );
    }

    #[tokio::test]
    async fn test_load_all_does_not_seed() {
        let store = store();
        assert!(store.load_all().await.unwrap().is_empty());
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_and_filter() {
        let store = store();
        store.seed_defaults().await.unwrap();

        let by_name = store.search("WELCOME").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "1");

        let by_content = store.search("ticket").await.unwrap();
        assert_eq!(by_content.len(), 1);
        assert_eq!(by_content[0].id, "4");

        let by_category = store.search("sales").await.unwrap();
        assert_eq!(by_category[0].id, "3");

        assert_eq!(store.filter_by_category("Business").await.unwrap().len(), 1);
        assert!(store.filter_by_category("business").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_categories_sorted_unique() {
        let store = store();
        store.seed_defaults().await.unwrap();
        store
            .create(CreateTemplateRequest::new("Another", "Sales", "x"))
            .await
            .unwrap();

        assert_eq!(
            store.categories().await.unwrap(),
            vec!["Business", "Greetings", "Sales", "Support"]
        );
    }
}
