//! `/quizzes`: random unseen question from a category.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, seed_question};
use serde_json::json;
use trivia_api::telemetry::QUIZ_QUESTIONS_CNTR;

#[tokio::test]
async fn missing_quiz_category_is_bad_request() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    for body in [
        json!({"previous_questions": [], "quiz_category": null}),
        json!({"previous_questions": []}),
        json!(null),
    ] {
        let response = post_json(app.clone(), "/quizzes", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], 400);
        assert_eq!(json["message"], "bad request");
    }
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let pool = common::test_pool().await;
    let response = post_json(
        common::build_test_app(pool),
        "/quizzes",
        json!({"previous_questions": [], "quiz_category": {"type": "Cooking", "id": 99}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "resource not found");
}

#[tokio::test]
async fn picks_unseen_question_of_the_category() {
    let pool = common::test_pool().await;
    let asked = seed_question(&pool, "Who painted the Mona Lisa?", 2).await;
    let scream = seed_question(&pool, "Who painted The Scream?", 2).await;
    let pop = seed_question(&pool, "What is pop art?", 2).await;
    seed_question(&pool, "What is H2O?", 1).await;
    let app = common::build_test_app(pool);

    for _ in 0..20 {
        let response = post_json(
            app.clone(),
            "/quizzes",
            json!({"previous_questions": [asked], "quiz_category": {"type": "Art", "id": 2}}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        let id = json["question"]["id"].as_i64().unwrap();
        assert!([scream, pop].contains(&id), "unexpected question {id}");
        assert_eq!(json["question"]["category"], 2);
    }
}

#[tokio::test]
async fn exhausted_category_returns_null_question() {
    let pool = common::test_pool().await;
    let first = seed_question(&pool, "Who painted the Mona Lisa?", 2).await;
    let second = seed_question(&pool, "Who painted The Scream?", 2).await;

    let response = post_json(
        common::build_test_app(pool),
        "/quizzes",
        json!({"previous_questions": [first, second], "quiz_category": {"type": "Art", "id": 2}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["question"].is_null());
}

#[tokio::test]
async fn category_without_questions_returns_null_question() {
    let pool = common::test_pool().await;
    let json = body_json(
        post_json(
            common::build_test_app(pool),
            "/quizzes",
            json!({"previous_questions": [], "quiz_category": {"type": "Sports", "id": 6}}),
        )
        .await,
    )
    .await;

    assert_eq!(json["success"], true);
    assert!(json["question"].is_null());
}

#[tokio::test]
async fn string_ids_and_missing_history_are_accepted() {
    let pool = common::test_pool().await;
    let only = seed_question(&pool, "What is H2O?", 1).await;
    let app = common::build_test_app(pool);

    let json = body_json(
        post_json(
            app.clone(),
            "/quizzes",
            json!({"quiz_category": {"type": "Science", "id": "1"}}),
        )
        .await,
    )
    .await;
    assert_eq!(json["question"]["id"], only);

    let json = body_json(
        post_json(
            app,
            "/quizzes",
            json!({"previous_questions": [only.to_string()], "quiz_category": {"id": "1"}}),
        )
        .await,
    )
    .await;
    assert!(json["question"].is_null());
}

#[tokio::test]
async fn served_questions_are_counted_per_category() {
    let pool = common::test_pool().await;
    seed_question(&pool, "Who won the 1966 World Cup?", 6).await;
    let sports = QUIZ_QUESTIONS_CNTR.with_label_values(&["Sports"]);
    let before = sports.get();

    let response = post_json(
        common::build_test_app(pool),
        "/quizzes",
        json!({"previous_questions": [], "quiz_category": {"type": "Sports", "id": 6}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    // other tests in this binary may serve Sports questions concurrently
    assert!(sports.get() > before);
}
