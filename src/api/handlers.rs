//! API Handlers
//!
//! HTTP request handlers for the catalog endpoints and the cache debug
//! panel.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::CacheRegistry;
use crate::catalog::{
    ActivityEntry, CatalogService, Condiment, CondimentDraft, CookProfile, DashboardStats,
    DietaryTag, DietaryTagDraft, Ingredient, IngredientDraft, IngredientFilter, Meal, MealDraft,
    MealFilter,
};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    ActivityQuery, CacheStatsResponse, ClearResponse, HealthResponse, RefreshRequest,
    RefreshResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CacheRegistry>,
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(registry: Arc<CacheRegistry>, catalog: Arc<CatalogService>) -> Self {
        Self { registry, catalog }
    }
}

// == Catalog Reads ==

/// Handler for GET /catalog/meals
pub async fn list_meals(
    State(state): State<AppState>,
    Query(filter): Query<MealFilter>,
) -> ApiResult<Json<Vec<Meal>>> {
    Ok(Json(state.catalog.all_meals(filter).await?))
}

/// Handler for GET /catalog/meals/:id
pub async fn get_meal(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Meal>> {
    let meal = state
        .catalog
        .meal(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("meal {id}")))?;
    Ok(Json(meal))
}

/// Handler for GET /catalog/ingredients
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(filter): Query<IngredientFilter>,
) -> ApiResult<Json<Vec<Ingredient>>> {
    Ok(Json(state.catalog.all_ingredients(filter).await?))
}

/// Handler for GET /catalog/condiments
pub async fn list_condiments(State(state): State<AppState>) -> ApiResult<Json<Vec<Condiment>>> {
    Ok(Json(state.catalog.all_condiments().await?))
}

/// Handler for GET /catalog/dietary-tags
pub async fn list_dietary_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<DietaryTag>>> {
    Ok(Json(state.catalog.dietary_tags().await?))
}

/// Handler for GET /catalog/stats
pub async fn dashboard_stats(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(state.catalog.dashboard_stats().await?))
}

/// Handler for GET /catalog/activities
pub async fn recent_activities(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> ApiResult<Json<Vec<ActivityEntry>>> {
    Ok(Json(state.catalog.recent_activities(query.limit()).await?))
}

/// Handler for GET /catalog/cooks/pending
pub async fn pending_cooks(State(state): State<AppState>) -> ApiResult<Json<Vec<CookProfile>>> {
    Ok(Json(state.catalog.pending_cooks().await?))
}

// == Catalog Writes ==

/// Handler for POST /catalog/meals
pub async fn create_meal(
    State(state): State<AppState>,
    Json(draft): Json<MealDraft>,
) -> ApiResult<Json<Meal>> {
    if let Some(error) = draft.validate() {
        return Err(ApiError::InvalidRequest(error));
    }
    Ok(Json(state.catalog.create_meal(draft).await?))
}

/// Handler for PUT /catalog/meals/:id
pub async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(draft): Json<MealDraft>,
) -> ApiResult<Json<Meal>> {
    if let Some(error) = draft.validate() {
        return Err(ApiError::InvalidRequest(error));
    }
    let meal = state
        .catalog
        .update_meal(id, draft)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("meal {id}")))?;
    Ok(Json(meal))
}

/// Handler for POST /catalog/meals/:id/archive
pub async fn archive_meal(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Meal>> {
    let meal = state
        .catalog
        .archive_meal(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("meal {id}")))?;
    Ok(Json(meal))
}

/// Handler for POST /catalog/ingredients
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(draft): Json<IngredientDraft>,
) -> ApiResult<Json<Ingredient>> {
    if let Some(error) = draft.validate() {
        return Err(ApiError::InvalidRequest(error));
    }
    Ok(Json(state.catalog.create_ingredient(draft).await?))
}

/// Handler for POST /catalog/ingredients/:id/archive
pub async fn archive_ingredient(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Ingredient>> {
    let ingredient = state
        .catalog
        .archive_ingredient(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("ingredient {id}")))?;
    Ok(Json(ingredient))
}

/// Handler for POST /catalog/condiments
pub async fn save_condiment(
    State(state): State<AppState>,
    Json(draft): Json<CondimentDraft>,
) -> ApiResult<Json<Condiment>> {
    Ok(Json(state.catalog.save_condiment(draft).await?))
}

/// Handler for POST /catalog/dietary-tags
pub async fn save_dietary_tag(
    State(state): State<AppState>,
    Json(draft): Json<DietaryTagDraft>,
) -> ApiResult<Json<DietaryTag>> {
    Ok(Json(state.catalog.save_dietary_tag(draft).await?))
}

/// Handler for POST /catalog/cooks/:id/verify
pub async fn verify_cook(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<CookProfile>> {
    let cook = state
        .catalog
        .verify_cook(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("cook {id}")))?;
    Ok(Json(cook))
}

// == Cache Debug Panel ==

/// Handler for GET /cache/stats
///
/// Read-only: snapshots never refresh recency or purge entries, so the
/// panel can poll this endpoint without disturbing cache behavior.
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::new(state.registry.snapshots().await))
}

/// Handler for POST /cache/clear
pub async fn cache_clear(State(state): State<AppState>) -> Json<ClearResponse> {
    Json(ClearResponse::new(state.registry.clear_all().await))
}

/// Handler for POST /cache/refresh
pub async fn cache_refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    if let Some(error) = req.validate() {
        return Err(ApiError::InvalidRequest(error));
    }
    let purged = state.registry.force_refresh(&req.patterns).await;
    Ok(Json(RefreshResponse::new(purged)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
