use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{categories_by_id, get_all_categories},
            questions::{self, count_questions, get_all_questions, get_question_by_id},
        },
        Category, NewQuestion, Question,
    },
    pagination::{paginate, PageQuery, QUESTIONS_PER_PAGE},
    server::{app::AppState, error::ApiError},
    telemetry::QUESTIONS_CREATED_CNTR,
};

use super::{page_number, ApiResponse};

/// A field counts as missing only when it is absent or `null`; `""` and `0`
/// are accepted.
#[derive(Deserialize)]
struct NewQuestionBody {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

impl NewQuestionBody {
    fn into_new_question(self) -> Option<NewQuestion> {
        Some(NewQuestion {
            question: self.question?,
            answer: self.answer?,
            category: self.category?,
            difficulty: self.difficulty?,
        })
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsResponse {
    total_questions: usize,
    current_category: Option<Category>,
    questions: Vec<Question>,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct DeletedResponse {
    success: bool,
}

#[derive(Serialize)]
struct CreatedResponse {
    success: bool,
    total_questions: i64,
    created: i64,
    questions: Vec<Question>,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionsResponse> {
    let questions = get_all_questions(&pool).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = get_all_categories(&pool).await?;
    Ok(Json(QuestionsResponse {
        total_questions: questions.len(),
        current_category: None,
        questions: paginate(&questions, page_number(query), QUESTIONS_PER_PAGE),
        categories: categories_by_id(categories),
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResponse<DeletedResponse> {
    let Path(id) = path.map_err(|_| ApiError::NotFound)?;
    let question = get_question_by_id(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    questions::delete_question(&pool, question.id).await?;
    tracing::info!(question_id = question.id, "Question deleted");
    Ok(Json(DeletedResponse { success: true }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<NewQuestionBody>, JsonRejection>,
) -> ApiResponse<CreatedResponse> {
    let Json(body) = body.map_err(|e| {
        tracing::debug!(error = %e, "Unreadable question body");
        ApiError::Unprocessable
    })?;
    let new_question = body.into_new_question().ok_or(ApiError::Unprocessable)?;

    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(ApiError::WriteRejected)?;
    QUESTIONS_CREATED_CNTR.inc();
    tracing::info!(question_id = id, category = new_question.category, "Question created");

    let total_questions = count_questions(&pool)
        .await
        .map_err(ApiError::WriteRejected)?;
    let all_questions = get_all_questions(&pool)
        .await
        .map_err(ApiError::WriteRejected)?;
    Ok(Json(CreatedResponse {
        success: true,
        total_questions,
        created: id,
        questions: paginate(&all_questions, page_number(query), QUESTIONS_PER_PAGE),
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<SearchResponse> {
    let Json(body) = body.map_err(|_| ApiError::Unprocessable)?;
    let term = body.search_term.ok_or(ApiError::Unprocessable)?;
    let matches = questions::search_questions(&pool, &term).await?;
    Ok(Json(SearchResponse {
        success: true,
        total_questions: matches.len(),
        questions: paginate(&matches, page_number(query), QUESTIONS_PER_PAGE),
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> NewQuestionBody {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn all_fields_present_makes_a_question() {
        let question = parse(
            r#"{"question": "Who?", "answer": "Me", "category": "5", "difficulty": 4}"#,
        )
        .into_new_question()
        .unwrap();
        assert_eq!(question.category, 5);
        assert_eq!(question.difficulty, 4);
    }

    #[test]
    fn null_or_absent_field_is_missing() {
        assert!(parse(r#"{"question": null, "answer": "a", "category": 1, "difficulty": 1}"#)
            .into_new_question()
            .is_none());
        assert!(parse(r#"{"question": "q", "answer": "a", "category": 1}"#)
            .into_new_question()
            .is_none());
    }

    #[test]
    fn empty_text_and_zero_count_as_present() {
        let question = parse(r#"{"question": "", "answer": "", "category": 0, "difficulty": 0}"#)
            .into_new_question()
            .unwrap();
        assert_eq!(question.question, "");
        assert_eq!(question.difficulty, 0);
    }
}
