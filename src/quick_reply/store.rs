//! Quick reply storage

use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::storage::{Change, Collection, DocumentBackend};
use crate::template::{require, TemplateResult};

use super::types::{CreateQuickReplyRequest, QuickReply, UpdateQuickReplyRequest};

/// Document name for the quick replies collection
pub const QUICK_REPLIES_DOCUMENT: &str = "quick-replies";

/// Default limit for [`QuickReplyStore::top_by_usage`]
pub const DEFAULT_POPULAR_LIMIT: usize = 5;

const DEFAULT_REPLIES: &[(&str, &str, &str, &str)] = &[
    ("1", "Thank you for your message! I'll get back to you soon.", "General", "/thanks"),
    ("2", "I'm currently away but will respond to your message as soon as possible.", "Away", "/away"),
    ("3", "Can you please provide more details about your request?", "Questions", "/details"),
    ("4", "Your order has been processed and will be delivered within 2-3 business days.", "Orders", "/delivered"),
    ("5", "Please contact our support team at support@company.com for technical assistance.", "Support", "/support"),
    ("6", "Yes, I can help you with that.", "Affirmative", "/yes"),
    ("7", "I'm sorry, but I cannot assist with that request.", "Negative", "/no"),
    ("8", "Let me check on that for you and get back to you shortly.", "General", "/check"),
];

/// Persistent quick reply storage
pub struct QuickReplyStore {
    replies: Collection<QuickReply>,
}

impl QuickReplyStore {
    /// Create a quick reply store over the given backend
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            replies: Collection::new(backend, QUICK_REPLIES_DOCUMENT),
        }
    }

    /// Write the example replies if the store has never been written.
    pub async fn seed_defaults(&self) -> TemplateResult<usize> {
        let defaults: Vec<QuickReply> = DEFAULT_REPLIES
            .iter()
            .map(|(id, text, category, shortcut)| QuickReply {
                id: id.to_string(),
                text: text.to_string(),
                category: category.to_string(),
                shortcut: Some(shortcut.to_string()),
                usage: 0,
            })
            .collect();
        let count = defaults.len();

        if self.replies.initialize(defaults).await? {
            tracing::info!(count, "Seeded default quick replies");
            Ok(count)
        } else {
            Ok(0)
        }
    }

    /// List all quick replies
    pub async fn load_all(&self) -> TemplateResult<Vec<QuickReply>> {
        Ok(self.replies.load().await?)
    }

    /// Get a quick reply by ID
    pub async fn get(&self, id: &str) -> TemplateResult<Option<QuickReply>> {
        Ok(self.load_all().await?.into_iter().find(|r| r.id == id))
    }

    /// Create a quick reply. `text` and `category` are required; a blank
    /// shortcut is stored as none.
    pub async fn create(&self, request: CreateQuickReplyRequest) -> TemplateResult<QuickReply> {
        require("text", &request.text)?;
        require("category", &request.category)?;

        let reply = QuickReply {
            id: Uuid::new_v4().to_string(),
            text: request.text,
            category: request.category,
            shortcut: request.shortcut.filter(|s| !s.trim().is_empty()),
            usage: 0,
        };

        let created = reply.clone();
        self.replies
            .modify(move |replies| {
                replies.push(reply);
                Change::Commit(())
            })
            .await?;

        tracing::info!(quick_reply_id = %created.id, "Quick reply created");
        Ok(created)
    }

    /// Update a quick reply. Returns `None` if the ID is unknown.
    ///
    /// `shortcut: Some(None)` clears the shortcut.
    pub async fn update(
        &self,
        id: &str,
        updates: UpdateQuickReplyRequest,
    ) -> TemplateResult<Option<QuickReply>> {
        if let Some(text) = &updates.text {
            require("text", text)?;
        }
        if let Some(category) = &updates.category {
            require("category", category)?;
        }

        let updated = self
            .replies
            .modify(|replies| {
                let Some(reply) = replies.iter_mut().find(|r| r.id == id) else {
                    return Change::Discard(None);
                };

                if let Some(text) = updates.text {
                    reply.text = text;
                }

                if let Some(category) = updates.category {
                    reply.category = category;
                }

                if let Some(shortcut) = updates.shortcut {
                    reply.shortcut = shortcut.filter(|s| !s.trim().is_empty());
                }

                Change::Commit(Some(reply.clone()))
            })
            .await?;

        if updated.is_some() {
            tracing::info!(quick_reply_id = %id, "Quick reply updated");
        }

        Ok(updated)
    }

    /// Delete a quick reply by ID. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> TemplateResult<bool> {
        let removed = self
            .replies
            .modify(|replies| {
                let before = replies.len();
                replies.retain(|r| r.id != id);
                if replies.len() == before {
                    Change::Discard(false)
                } else {
                    Change::Commit(true)
                }
            })
            .await?;

        if removed {
            tracing::info!(quick_reply_id = %id, "Quick reply deleted");
        }

        Ok(removed)
    }

    /// Bump the usage counter. Returns whether the quick reply existed.
    pub async fn increment_usage(&self, id: &str) -> TemplateResult<bool> {
        Ok(self
            .replies
            .modify(|replies| match replies.iter_mut().find(|r| r.id == id) {
                Some(reply) => {
                    reply.usage += 1;
                    Change::Commit(true)
                }
                None => Change::Discard(false),
            })
            .await?)
    }

    /// Case-insensitive substring search over text, category and shortcut
    pub async fn search(&self, query: &str) -> TemplateResult<Vec<QuickReply>> {
        let query = query.to_lowercase();

        Ok(self
            .load_all()
            .await?
            .into_iter()
            .filter(|r| {
                r.text.to_lowercase().contains(&query)
                    || r.category.to_lowercase().contains(&query)
                    || r
                        .shortcut
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&query))
            })
            .collect())
    }

    /// Quick replies whose category matches exactly
    pub async fn filter_by_category(&self, category: &str) -> TemplateResult<Vec<QuickReply>> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .filter(|r| r.category == category)
            .collect())
    }

    /// Most used replies first; equal usage keeps insertion order.
    pub async fn top_by_usage(&self, limit: usize) -> TemplateResult<Vec<QuickReply>> {
        let mut replies = self.load_all().await?;
        replies.sort_by(|a, b| b.usage.cmp(&a.usage));
        replies.truncate(limit);
        Ok(replies)
    }

    /// Distinct categories, sorted
    pub async fn categories(&self) -> TemplateResult<Vec<String>> {
        let categories: BTreeSet<String> = self
            .load_all()
            .await?
            .into_iter()
            .map(|r| r.category)
            .collect();

        Ok(categories.into_iter().collect())
    }

    /// Get the number of quick replies
    pub async fn count(&self) -> TemplateResult<usize> {
        Ok(self.load_all().await?.len())
    }
}

/// Create an Arc-wrapped quick reply store
pub fn create_quick_reply_store(backend: Arc<dyn DocumentBackend>) -> Arc<QuickReplyStore> {
    Arc::new(QuickReplyStore::new(backend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use crate::template::TemplateError;

    fn store() -> QuickReplyStore {
        QuickReplyStore::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = store();
        let created = store
            .create(CreateQuickReplyRequest::new("On my way", "Status").with_shortcut("/omw"))
            .await
            .unwrap();

        assert_eq!(created.usage, 0);
        let fetched = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.shortcut.as_deref(), Some("/omw"));
    }

    #[tokio::test]
    async fn test_create_requires_text_and_category() {
        let store = store();

        let result = store.create(CreateQuickReplyRequest::new("", "Status")).await;
        assert!(matches!(result, Err(TemplateError::Validation(_))));

        let result = store.create(CreateQuickReplyRequest::new("Hi", "")).await;
        assert!(matches!(result, Err(TemplateError::Validation(_))));

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_and_clear_shortcut() {
        let store = store();
        let created = store
            .create(CreateQuickReplyRequest::new("Hi", "General").with_shortcut("/hi"))
            .await
            .unwrap();

        let updates = UpdateQuickReplyRequest {
            text: Some("Hello".to_string()),
            category: None,
            shortcut: Some(None),
        };
        let updated = store.update(&created.id, updates).await.unwrap().unwrap();

        assert_eq!(updated.text, "Hello");
        assert_eq!(updated.category, "General");
        assert!(updated.shortcut.is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown() {
        let store = store();
        store.seed_defaults().await.unwrap();

        let updates = UpdateQuickReplyRequest::default();
        assert!(store.update("nope", updates).await.unwrap().is_none());
        assert!(!store.delete("nope").await.unwrap());
        assert_eq!(store.count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_search_matches_shortcut() {
        let store = store();
        store.seed_defaults().await.unwrap();

        let results = store.search("/AWAY").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "2");

        let general = store.filter_by_category("General").await.unwrap();
        let ids: Vec<&str> = general.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "8"]);
    }

    #[tokio::test]
    async fn test_top_by_usage_stable() {
        let store = store();
        store.seed_defaults().await.unwrap();

        store.increment_usage("3").await.unwrap();
        store.increment_usage("3").await.unwrap();
        store.increment_usage("5").await.unwrap();
        store.increment_usage("7").await.unwrap();
        assert!(!store.increment_usage("missing").await.unwrap());

        let top = store.top_by_usage(4).await.unwrap();
        let ids: Vec<&str> = top.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "5", "7", "1"]);
        assert_eq!(top[0].usage, 2);
    }

    #[tokio::test]
    async fn test_categories() {
        let store = store();
        store.seed_defaults().await.unwrap();

        let categories = store.categories().await.unwrap();
        assert_eq!(categories.len(), 7);
        assert_eq!(categories[0], "Affirmative");
        assert_eq!(categories[6], "Support");
    }
}
