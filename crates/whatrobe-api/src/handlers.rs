//! API Handlers
use crate::error::ApiError;
use crate::middleware::UserId;
use crate::state::AppState;
use crate::store::{FavoriteOutfit, NewClothingItem, StoredItem};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;
use whatrobe_core::{
    Category, ExecutionContext, Label, OutfitCandidate, PartialPreferences, Recommendation,
    WHATROBE_VERSION,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

pub async fn add_item(
    State(state): State<AppState>,
    user: UserId,
    Json(payload): Json<NewClothingItem>,
) -> Result<(StatusCode, Json<StoredItem>), ApiError> {
    let item = payload.into_item(uuid::Uuid::new_v4().to_string());
    let stored = state.inventory.add(user.as_str(), item).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list_items(
    State(state): State<AppState>,
    user: UserId,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let category = match query.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(raw) => Some(
            Category::parse_exact(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown category '{}'", raw)))?,
        ),
        None => None,
    };

    let items = state.inventory.list(user.as_str(), category).await;
    Ok(Json(json!({ "items": items })))
}

pub async fn get_item(
    State(state): State<AppState>,
    user: UserId,
    Path(id): Path<String>,
) -> Result<Json<StoredItem>, ApiError> {
    Ok(Json(state.inventory.get(user.as_str(), &id).await?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    user: UserId,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.inventory.delete(user.as_str(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn recommend(
    State(state): State<AppState>,
    user: UserId,
    Json(preferences): Json<PartialPreferences>,
) -> Json<Recommendation> {
    let inventory = state.inventory.inventory(user.as_str()).await;
    let mut ctx = ExecutionContext::new(user.as_str()).with_optional_seed(state.seed);

    let start = Instant::now();
    let recommendation = state.runner.run(&inventory, &preferences, &mut ctx).await;
    state.metrics.observe(&recommendation, start.elapsed());

    Json(recommendation)
}

pub async fn list_favorites(State(state): State<AppState>, user: UserId) -> Json<Value> {
    let favorites = state.favorites.list(user.as_str()).await;
    Json(json!({ "favorites": favorites }))
}

pub async fn save_favorite(
    State(state): State<AppState>,
    user: UserId,
    Json(outfit): Json<OutfitCandidate>,
) -> (StatusCode, Json<FavoriteOutfit>) {
    let favorite = state.favorites.save(user.as_str(), outfit).await;
    (StatusCode::CREATED, Json(favorite))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": WHATROBE_VERSION,
        "pipeline": state.runner.pipeline_id(),
        "stages": state.runner.stage_ids(),
    }))
}

pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .metrics
        .encode()
        .map_err(|e| ApiError::Internal(format!("metrics encoding failed: {}", e)))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}
