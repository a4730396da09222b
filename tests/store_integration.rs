//! File-backed store integration tests
//!
//! Exercise persistence across store instances sharing one data directory.

use std::sync::Arc;

use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

use message_template_service::quick_reply::{CreateQuickReplyRequest, QuickReplyStore};
use message_template_service::storage::{DocumentBackend, JsonFileBackend};
use message_template_service::template::{
    CreateTemplateRequest, TemplateError, TemplateStore, UpdateTemplateRequest,
};

fn file_backend(dir: &TempDir) -> Arc<dyn DocumentBackend> {
    Arc::new(JsonFileBackend::new(dir.path()))
}

#[tokio::test]
async fn test_templates_survive_restart() {
    let dir = TempDir::new().unwrap();

    let id = {
        let store = TemplateStore::new(file_backend(&dir));
        let created = assert_ok!(
            store
                .create(CreateTemplateRequest::new("Greet", "G", "Hi {{name}}"))
                .await
        );
        assert_ok!(store.increment_usage(&created.id).await);
        created.id
    };

    let store = TemplateStore::new(file_backend(&dir));
    let template = store.get(&id).await.unwrap().expect("template persisted");
    assert_eq!(template.name, "Greet");
    assert_eq!(template.variables, vec!["name"]);
    assert_eq!(template.usage, 1);
}

#[tokio::test]
async fn test_document_layout_on_disk() {
    let dir = TempDir::new().unwrap();
    let templates = TemplateStore::new(file_backend(&dir));
    let replies = QuickReplyStore::new(file_backend(&dir));

    templates
        .create(CreateTemplateRequest::new("Greet", "G", "Hi {{name}}"))
        .await
        .unwrap();
    replies
        .create(CreateQuickReplyRequest::new("On my way", "Status"))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(dir.path().join("templates.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &json[0];
    assert!(first.get("createdAt").is_some());
    assert!(first.get("updatedAt").is_some());
    assert_eq!(first["usage"], 0);

    let raw = std::fs::read_to_string(dir.path().join("quick-replies.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["text"], "On my way");
    assert!(json[0].get("shortcut").is_none());
}

#[tokio::test]
async fn test_seed_only_into_fresh_directory() {
    let dir = TempDir::new().unwrap();

    let store = TemplateStore::new(file_backend(&dir));
    assert_eq!(store.seed_defaults().await.unwrap(), 4);

    for template in store.load_all().await.unwrap() {
        assert!(store.delete(&template.id).await.unwrap());
    }

    let restarted = TemplateStore::new(file_backend(&dir));
    assert_eq!(restarted.seed_defaults().await.unwrap(), 0);
    assert_eq!(restarted.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_corrupt_document_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("templates.json"), "{ not json").unwrap();

    let store = TemplateStore::new(file_backend(&dir));
    let err = assert_err!(store.load_all().await);
    assert!(matches!(err, TemplateError::Storage(_)));
}

#[tokio::test]
async fn test_concurrent_usage_increments_are_not_lost() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(TemplateStore::new(file_backend(&dir)));
    store.seed_defaults().await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..25 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.increment_usage("1").await.unwrap()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let template = store.get("1").await.unwrap().unwrap();
    assert_eq!(template.usage, 25);
}

#[tokio::test]
async fn test_update_preserves_identity() {
    let dir = TempDir::new().unwrap();
    let store = TemplateStore::new(file_backend(&dir));
    store.seed_defaults().await.unwrap();

    let before = store.get("3").await.unwrap().unwrap();
    let update = UpdateTemplateRequest {
        content: Some("Order {{orderNumber}} shipped".to_string()),
        ..Default::default()
    };
    let after = store.update("3", update).await.unwrap().unwrap();

    assert_eq!(after.id, before.id);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.name, "Order Confirmation");
    assert_eq!(after.variables, vec!["orderNumber"]);
    assert!(after.updated_at >= before.updated_at);
}
