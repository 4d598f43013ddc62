//! Integration Tests for the Dashboard API
//!
//! Drives the full router: memoized reads, invalidating writes, the cache
//! debug panel and error bodies.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pinggang_cache::cache::CacheRegistry;
use pinggang_cache::catalog::{CatalogService, FixtureBackend};
use pinggang_cache::{AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let registry = Arc::new(CacheRegistry::new(&Config::default()));
    let backend = Arc::new(FixtureBackend::seeded());
    let catalog = Arc::new(CatalogService::new(registry.clone(), backend));
    pinggang_cache::api::create_router(AppState::new(registry, catalog))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn store_stats<'a>(stats: &'a Value, name: &str) -> &'a Value {
    stats["stores"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == name)
        .unwrap()
}

// == Catalog Read Tests ==

#[tokio::test]
async fn test_list_meals_returns_seeded_catalog() {
    let app = create_test_app();

    let (status, meals) = get(&app, "/catalog/meals").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = meals
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Chicken Tinola"));
    assert!(names.contains(&"Arroz Caldo"));
}

#[tokio::test]
async fn test_meal_filter_query() {
    let app = create_test_app();

    let (status, meals) = get(&app, "/catalog/meals?food_group=go").await;

    assert_eq!(status, StatusCode::OK);
    let meals = meals.as_array().unwrap();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0]["name"], "Arroz Caldo");
}

#[tokio::test]
async fn test_repeated_read_hits_the_cache() {
    let app = create_test_app();

    get(&app, "/catalog/meals").await;
    get(&app, "/catalog/meals").await;

    let (status, stats) = get(&app, "/cache/stats").await;
    assert_eq!(status, StatusCode::OK);

    let dynamic = store_stats(&stats, "dynamic");
    assert_eq!(dynamic["stats"]["hits"], json!(1));
    assert_eq!(dynamic["stats"]["misses"], json!(1));
    assert_eq!(dynamic["size"], json!(1));
}

#[tokio::test]
async fn test_get_missing_meal_returns_error_body() {
    let app = create_test_app();

    let (status, body) = get(&app, "/catalog/meals/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

// == Catalog Write Tests ==

#[tokio::test]
async fn test_create_meal_invalidates_listing() {
    let app = create_test_app();

    // Prime the cache.
    let (_, before) = get(&app, "/catalog/meals").await;
    let before_count = before.as_array().unwrap().len();

    let (status, created) = post_json(
        &app,
        "/catalog/meals",
        json!({"name": "Pinakbet", "food_group": "glow", "ingredient_ids": [3]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Pinakbet");

    // The next read refetches and sees the new meal.
    let (_, after) = get(&app, "/catalog/meals").await;
    assert_eq!(after.as_array().unwrap().len(), before_count + 1);
}

#[tokio::test]
async fn test_create_meal_with_empty_name_is_rejected() {
    let app = create_test_app();

    let (status, body) = post_json(
        &app,
        "/catalog/meals",
        json!({"name": "", "food_group": "go"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_verify_cook_flow() {
    let app = create_test_app();

    let (_, pending) = get(&app, "/catalog/cooks/pending").await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (status, verified) = post_json(&app, "/catalog/cooks/40/verify", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["verified"], json!(true));

    let (_, pending) = get(&app, "/catalog/cooks/pending").await;
    assert!(pending.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_write_populates_activity_feed() {
    let app = create_test_app();

    let (_, empty) = get(&app, "/catalog/activities").await;
    assert!(empty.as_array().unwrap().is_empty());

    post_json(
        &app,
        "/catalog/ingredients",
        json!({"name": "Kalabasa", "food_group": "glow"}),
    )
    .await;

    let (_, activities) = get(&app, "/catalog/activities?limit=5").await;
    let activities = activities.as_array().unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0]["action"], "ingredient.created");
}

// == Cache Debug Panel Tests ==

#[tokio::test]
async fn test_cache_stats_lists_all_volatility_classes() {
    let app = create_test_app();

    let (status, stats) = get(&app, "/cache/stats").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = stats["stores"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["reference", "dynamic", "user"]);
}

#[tokio::test]
async fn test_cache_clear_empties_stores() {
    let app = create_test_app();

    get(&app, "/catalog/meals").await;
    get(&app, "/catalog/dietary-tags").await;

    let (status, cleared) = post_json(&app, "/cache/clear", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["cleared"], json!(2));

    let (_, stats) = get(&app, "/cache/stats").await;
    for store in stats["stores"].as_array().unwrap() {
        assert_eq!(store["size"], json!(0));
    }
}

#[tokio::test]
async fn test_cache_refresh_purges_matching_patterns() {
    let app = create_test_app();

    get(&app, "/catalog/meals").await;
    get(&app, "/catalog/stats").await;

    let (status, refreshed) = post_json(
        &app,
        "/cache/refresh",
        json!({"patterns": ["get_all_meals"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["purged"], json!(1));

    let (_, stats) = get(&app, "/cache/stats").await;
    let dynamic = store_stats(&stats, "dynamic");
    let keys: Vec<&str> = dynamic["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert!(!keys.iter().any(|k| k.starts_with("get_all_meals")));
    assert!(keys.iter().any(|k| k.starts_with("get_dashboard_stats")));
}

#[tokio::test]
async fn test_cache_refresh_rejects_empty_patterns() {
    let app = create_test_app();

    let (status, body) = post_json(&app, "/cache/refresh", json!({"patterns": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body.get("timestamp").is_some());
}
