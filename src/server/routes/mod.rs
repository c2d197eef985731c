mod categories;
mod questions;
mod quizzes;

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::Json;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use crate::pagination::PageQuery;
use crate::server::error::ApiError;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

// an unreadable query string is treated like a missing one
fn page_number(query: Result<Query<PageQuery>, QueryRejection>) -> i64 {
    query.map(|Query(q)| q).unwrap_or_default().number()
}
