#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use trivia_api::db::queries::questions::create_question;
use trivia_api::db::{establish_memory_connection, run_migrations, NewQuestion};
use trivia_api::server::app::{build_router, AppState};

/// A fresh migrated in-memory database; categories 1..=6 are seeded.
pub async fn test_pool() -> SqlitePool {
    let pool = establish_memory_connection().await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub fn build_test_app(pool: SqlitePool) -> Router {
    build_router(AppState::new(pool))
}

pub async fn seed_question(pool: &SqlitePool, question: &str, category: i64) -> i64 {
    create_question(
        pool,
        &NewQuestion {
            question: question.to_owned(),
            answer: format!("answer to {question}"),
            category,
            difficulty: 1,
        },
    )
    .await
    .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
