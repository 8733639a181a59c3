//! HTTP-level tests for the movie endpoints.
//!
//! Requests go straight to the router through tower::ServiceExt, no TCP
//! listener. Each test gets its own in-memory SQLite database with
//! migrations (including the genre/language seed) applied.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use movie_catalog::{AppState, catalog::Catalog, router};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    router(Arc::new(AppState { catalog: Catalog::new(db) }))
}

async fn get(app: &Router, uri: &str) -> Response<axum::body::Body> {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn post_json(app: &Router, uri: &str, body: Value) -> Response<axum::body::Body> {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn put_json(app: &Router, uri: &str, body: Value) -> Response<axum::body::Body> {
    let req = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn delete(app: &Router, uri: &str) -> Response<axum::body::Body> {
    let req = Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn body_bytes(resp: Response<axum::body::Body>) -> Vec<u8> {
    resp.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(resp: Response<axum::body::Body>) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

fn inception() -> Value {
    json!({
        "title": "Inception",
        "genre_id": 7,
        "language_id": 1,
        "oscar_count": 4,
        "release_date": "2010-07-16"
    })
}

#[tokio::test]
async fn register_returns_201_with_empty_body() {
    let app = test_app().await;

    let resp = post_json(&app, "/movies", inception()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn registered_movie_shows_up_in_list_with_expanded_relations() {
    let app = test_app().await;
    post_json(&app, "/movies", inception()).await;

    let resp = get(&app, "/movies").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let movies = body_json(resp).await;
    assert_eq!(movies.as_array().unwrap().len(), 1);
    assert_eq!(movies[0]["title"], "Inception");
    assert_eq!(movies[0]["oscar_count"], 4);
    assert_eq!(movies[0]["release_date"], "2010-07-16");
    assert_eq!(movies[0]["genres"]["name"], "Sci-Fi");
    assert_eq!(movies[0]["languages"]["name"], "English");
    assert!(movies[0]["id"].is_number());
}

#[tokio::test]
async fn duplicate_title_is_rejected_ignoring_case() {
    let app = test_app().await;
    post_json(&app, "/movies", inception()).await;

    let resp = post_json(
        &app,
        "/movies",
        json!({"title": "inception", "genre_id": 7, "language_id": 1}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(resp).await,
        json!({"message": "This movie title has been registered already"})
    );

    let movies = body_json(get(&app, "/movies").await).await;
    assert_eq!(movies.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unparseable_release_date_yields_generic_500() {
    let app = test_app().await;

    let resp = post_json(
        &app,
        "/movies",
        json!({"title": "Inception", "genre_id": 7, "language_id": 1, "release_date": "soon"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, json!({"message": "Failed to register the movie"}));
}

#[tokio::test]
async fn list_is_ordered_by_title() {
    let app = test_app().await;
    for title in ["Zodiac", "Arrival", "Memento"] {
        let resp =
            post_json(&app, "/movies", json!({"title": title, "genre_id": 8, "language_id": 1}))
                .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let movies = body_json(get(&app, "/movies").await).await;
    let titles: Vec<_> =
        movies.as_array().unwrap().iter().map(|m| m["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Arrival", "Memento", "Zodiac"]);
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let app = test_app().await;
    post_json(&app, "/movies", inception()).await;
    let movies = body_json(get(&app, "/movies").await).await;
    let id = movies[0]["id"].as_i64().unwrap();

    let resp = put_json(&app, &format!("/movies/{id}"), json!({"oscar_count": 11})).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());

    let movies = body_json(get(&app, "/movies").await).await;
    assert_eq!(movies[0]["oscar_count"], 11);
    assert_eq!(movies[0]["title"], "Inception");
    assert_eq!(movies[0]["release_date"], "2010-07-16");
    assert_eq!(movies[0]["genres"]["name"], "Sci-Fi");
}

#[tokio::test]
async fn update_of_missing_or_garbage_id_returns_404() {
    let app = test_app().await;

    let resp = put_json(&app, "/movies/999", json!({"oscar_count": 1})).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({"message": "Movie not found"}));

    let resp = put_json(&app, "/movies/abc", json!({"oscar_count": 1})).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_movie_from_subsequent_lists() {
    let app = test_app().await;
    post_json(&app, "/movies", inception()).await;
    let movies = body_json(get(&app, "/movies").await).await;
    let id = movies[0]["id"].as_i64().unwrap();

    let resp = delete(&app, &format!("/movies/{id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());

    let movies = body_json(get(&app, "/movies").await).await;
    assert!(movies.as_array().unwrap().is_empty());

    let resp = delete(&app, &format!("/movies/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({"message": "Movie not found"}));
}

#[tokio::test]
async fn genre_filter_matches_case_insensitively() {
    let app = test_app().await;
    post_json(&app, "/movies", inception()).await;
    post_json(&app, "/movies", json!({"title": "Alien", "genre_id": 5, "language_id": 1})).await;

    let resp = get(&app, "/movies/genre/sci-fi").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let movies = body_json(resp).await;
    assert_eq!(movies.as_array().unwrap().len(), 1);
    assert_eq!(movies[0]["title"], "Inception");
    assert_eq!(movies[0]["languages"]["name"], "English");
}

#[tokio::test]
async fn genre_filter_with_no_matches_returns_empty_array() {
    let app = test_app().await;
    post_json(&app, "/movies", inception()).await;

    let resp = get(&app, "/movies/genre/Romance").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));

    let resp = get(&app, "/movies/genre/nonexistent").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
}
