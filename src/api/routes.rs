//! API Routes
//!
//! Configures the Axum router for the dashboard API and the cache debug
//! panel.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    archive_ingredient, archive_meal, cache_clear, cache_refresh, cache_stats, create_ingredient,
    create_meal, dashboard_stats, get_meal, health_handler, list_condiments, list_dietary_tags,
    list_ingredients, list_meals, pending_cooks, recent_activities, save_condiment,
    save_dietary_tag, update_meal, verify_cook, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// Catalog reads are memoized; catalog writes invalidate affected cache
/// entries after the backend mutation succeeds. `/cache/*` is the operator
/// debug panel.
///
/// # Middleware
/// - CORS: allows any origin so the dashboard front end can call the API
/// - Tracing: logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Catalog reads
        .route("/catalog/meals", get(list_meals).post(create_meal))
        .route("/catalog/meals/:id", get(get_meal).put(update_meal))
        .route("/catalog/meals/:id/archive", post(archive_meal))
        .route(
            "/catalog/ingredients",
            get(list_ingredients).post(create_ingredient),
        )
        .route("/catalog/ingredients/:id/archive", post(archive_ingredient))
        .route("/catalog/condiments", get(list_condiments).post(save_condiment))
        .route(
            "/catalog/dietary-tags",
            get(list_dietary_tags).post(save_dietary_tag),
        )
        .route("/catalog/stats", get(dashboard_stats))
        .route("/catalog/activities", get(recent_activities))
        .route("/catalog/cooks/pending", get(pending_cooks))
        .route("/catalog/cooks/:id/verify", post(verify_cook))
        // Cache debug panel
        .route("/cache/stats", get(cache_stats))
        .route("/cache/clear", post(cache_clear))
        .route("/cache/refresh", post(cache_refresh))
        // Health
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use super::*;
    use crate::cache::CacheRegistry;
    use crate::catalog::{CatalogService, FixtureBackend};
    use crate::config::Config;

    fn create_test_app() -> Router {
        let registry = Arc::new(CacheRegistry::new(&Config::default()));
        let backend = Arc::new(FixtureBackend::seeded());
        let catalog = Arc::new(CatalogService::new(registry.clone(), backend));
        create_router(AppState::new(registry, catalog))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_meals_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/catalog/meals")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cache_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_meal_returns_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/catalog/meals/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
