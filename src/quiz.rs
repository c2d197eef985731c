use rand::seq::SliceRandom;
use sqlx::SqlitePool;

use crate::db::queries::{categories::get_category, questions::get_unseen_questions_for_category};
use crate::db::Question;
use crate::telemetry::QUIZ_QUESTIONS_CNTR;

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("category {0} does not exist")]
    UnknownCategory(i64),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Picks a question of `category_id` that is not in `previous`. `Ok(None)`
/// means every question of the category was already asked.
pub async fn next_question(
    pool: &SqlitePool,
    category_id: i64,
    previous: &[i64],
) -> Result<Option<Question>, QuizError> {
    let category = get_category(pool, category_id)
        .await?
        .ok_or(QuizError::UnknownCategory(category_id))?;
    let eligible = get_unseen_questions_for_category(pool, category.id, previous).await?;
    let picked = pick(&eligible);
    match &picked {
        Some(question) => {
            QUIZ_QUESTIONS_CNTR
                .with_label_values(&[category.kind.as_str()])
                .inc();
            tracing::debug!(
                category = %category.kind,
                question_id = question.id,
                "Quiz question picked"
            );
        }
        None => tracing::debug!(category = %category.kind, "Quiz exhausted"),
    }
    Ok(picked)
}

fn pick(eligible: &[Question]) -> Option<Question> {
    eligible.choose(&mut rand::thread_rng()).cloned()
}
