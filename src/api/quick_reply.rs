//! Quick reply CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::metrics::USAGE_INCREMENTS_TOTAL;
use crate::quick_reply::{
    CreateQuickReplyRequest, QuickReply, QuickReplyListResponse, UpdateQuickReplyRequest,
    DEFAULT_POPULAR_LIMIT,
};
use crate::server::AppState;

use super::template::non_blank;

#[derive(Debug, Default, Deserialize)]
pub struct QuickReplyListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub popular: bool,
    pub limit: Option<usize>,
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Quick reply {}", id))
}

/// GET /api/v1/quick-replies - List, search, filter or rank quick replies
#[tracing::instrument(name = "http.list_quick_replies", skip(state))]
pub async fn list_quick_replies(
    State(state): State<AppState>,
    Query(query): Query<QuickReplyListQuery>,
) -> Result<Json<QuickReplyListResponse>> {
    let store = &state.quick_reply_store;

    let quick_replies = if query.popular {
        store
            .top_by_usage(query.limit.unwrap_or(DEFAULT_POPULAR_LIMIT))
            .await?
    } else if let Some(search) = non_blank(query.search) {
        store.search(&search).await?
    } else if let Some(category) = non_blank(query.category) {
        store.filter_by_category(&category).await?
    } else {
        store.load_all().await?
    };
    let categories = store.categories().await?;
    let total = quick_replies.len();

    Ok(Json(QuickReplyListResponse {
        quick_replies,
        categories,
        total,
    }))
}

/// POST /api/v1/quick-replies - Create a quick reply
#[tracing::instrument(name = "http.create_quick_reply", skip(state, request))]
pub async fn create_quick_reply(
    State(state): State<AppState>,
    Json(request): Json<CreateQuickReplyRequest>,
) -> Result<(StatusCode, Json<QuickReply>)> {
    let created = state.quick_reply_store.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/quick-replies/{id}
#[tracing::instrument(name = "http.get_quick_reply", skip(state))]
pub async fn get_quick_reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuickReply>> {
    state
        .quick_reply_store
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// PUT /api/v1/quick-replies/{id}
#[tracing::instrument(name = "http.update_quick_reply", skip(state, request))]
pub async fn update_quick_reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuickReplyRequest>,
) -> Result<Json<QuickReply>> {
    state
        .quick_reply_store
        .update(&id, request)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// DELETE /api/v1/quick-replies/{id}
#[tracing::instrument(name = "http.delete_quick_reply", skip(state))]
pub async fn delete_quick_reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.quick_reply_store.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}

/// POST /api/v1/quick-replies/{id}/usage
#[tracing::instrument(name = "http.increment_quick_reply_usage", skip(state))]
pub async fn increment_quick_reply_usage(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.quick_reply_store.increment_usage(&id).await? {
        USAGE_INCREMENTS_TOTAL
            .with_label_values(&["quick_reply"])
            .inc();
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}
