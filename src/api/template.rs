//! Template CRUD and processing endpoints.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::metrics::{TEMPLATES_RENDERED_TOTAL, USAGE_INCREMENTS_TOTAL};
use crate::server::AppState;
use crate::template::{
    self, CreateTemplateRequest, MessageTemplate, ProcessedTemplate, TemplateListResponse,
    TemplatePreview, UpdateTemplateRequest,
};

#[derive(Debug, Default, Deserialize)]
pub struct TemplateListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProcessTemplateRequest {
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Template {}", id))
}

/// Treat `?search=` like an absent parameter
pub(super) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn load_template(state: &AppState, id: &str) -> Result<MessageTemplate> {
    state
        .template_store
        .get(id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/templates - List, search or filter templates
#[tracing::instrument(name = "http.list_templates", skip(state))]
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateListQuery>,
) -> Result<Json<TemplateListResponse>> {
    let store = &state.template_store;

    let templates = match (non_blank(query.search), non_blank(query.category)) {
        (Some(search), _) => store.search(&search).await?,
        (None, Some(category)) => store.filter_by_category(&category).await?,
        (None, None) => store.load_all().await?,
    };
    let categories = store.categories().await?;
    let total = templates.len();

    Ok(Json(TemplateListResponse {
        templates,
        categories,
        total,
    }))
}

/// POST /api/v1/templates - Create a new template
#[tracing::instrument(
    name = "http.create_template",
    skip(state, request),
    fields(name = %request.name)
)]
pub async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<MessageTemplate>)> {
    let created = state.template_store.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/templates/{id} - Get a specific template
#[tracing::instrument(name = "http.get_template", skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageTemplate>> {
    Ok(Json(load_template(&state, &id).await?))
}

/// PUT /api/v1/templates/{id} - Update an existing template
#[tracing::instrument(name = "http.update_template", skip(state, request))]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<MessageTemplate>> {
    state
        .template_store
        .update(&id, request)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// DELETE /api/v1/templates/{id} - Delete a template
#[tracing::instrument(name = "http.delete_template", skip(state))]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.template_store.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}

/// POST /api/v1/templates/{id}/process - Substitute variables
#[tracing::instrument(name = "http.process_template", skip(state, request))]
pub async fn process_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ProcessTemplateRequest>,
) -> Result<Json<ProcessedTemplate>> {
    let template = load_template(&state, &id).await?;
    let processed = template::render(&template, &request.variables);

    TEMPLATES_RENDERED_TOTAL.inc();
    if !processed.all_variables_provided {
        tracing::debug!(
            template_id = %id,
            missing = ?processed.missing_variables,
            "Template processed with missing variables"
        );
    }

    Ok(Json(processed))
}

/// GET /api/v1/templates/{id}/preview - Render with sample values
#[tracing::instrument(name = "http.preview_template", skip(state))]
pub async fn preview_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TemplatePreview>> {
    let template = load_template(&state, &id).await?;
    Ok(Json(template::preview(&template, Utc::now())))
}

/// POST /api/v1/templates/{id}/usage - Increment the usage counter
#[tracing::instrument(name = "http.increment_template_usage", skip(state))]
pub async fn increment_template_usage(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if state.template_store.increment_usage(&id).await? {
        USAGE_INCREMENTS_TOTAL.with_label_values(&["template"]).inc();
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}
