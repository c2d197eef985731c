use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{categories_by_id, get_all_categories, get_category},
            questions::get_questions_for_category,
        },
        Category, Question,
    },
    pagination::{paginate, PageQuery, QUESTIONS_PER_PAGE},
    server::{app::AppState, error::ApiError},
};

use super::{page_number, ApiResponse};

#[derive(Serialize)]
struct CategoriesResponse {
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    total_questions: usize,
    questions: Vec<Question>,
    current_category: Category,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse {
        categories: categories_by_id(categories),
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<CategoryQuestionsResponse> {
    let Path(id) = path.map_err(|_| ApiError::NotFound)?;
    let category = get_category(&pool, id).await?.ok_or(ApiError::NotFound)?;
    let questions = get_questions_for_category(&pool, category.id).await?;
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions: paginate(&questions, page_number(query), QUESTIONS_PER_PAGE),
        current_category: category,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
