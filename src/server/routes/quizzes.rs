use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::Question,
    quiz,
    server::{app::AppState, deserializers::LooseI64, error::ApiError},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizCategory {
    id: LooseI64,
}

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Option<Vec<LooseI64>>,
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResponse<QuizResponse> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;
    let category = body.quiz_category.ok_or(ApiError::BadRequest)?;
    let previous: Vec<i64> = body
        .previous_questions
        .unwrap_or_default()
        .into_iter()
        .map(|id| id.0)
        .collect();

    let question = quiz::next_question(&pool, category.id.0, &previous).await?;
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
