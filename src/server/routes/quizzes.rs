use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    quiz::{pick_next, QuizCategory, QuizFilter},
    server::{
        app::AppState,
        error::{ApiError, ApiResponse},
        extract::ApiJson,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

#[derive(Deserialize)]
struct QuizRound {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

#[derive(Serialize)]
struct NextQuestion {
    success: bool,
    question: Question,
    total_questions: usize,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(round): ApiJson<QuizRound>,
) -> ApiResponse<Json<NextQuestion>> {
    let filter = round.quiz_category.filter().ok_or(ApiError::BadRequest)?;
    let candidates = match filter {
        QuizFilter::Category(category) => {
            questions::get_questions_for_category(&pool, category).await?
        }
        QuizFilter::All => questions::get_all_questions(&pool).await?,
    };
    let question = pick_next(&candidates, &round.previous_questions, &mut rand::thread_rng())
        .cloned()
        .ok_or(ApiError::NotFound)?;

    let label = filter.label();
    QUIZ_QUESTIONS_SERVED
        .with_label_values(&[label.as_str()])
        .inc();
    tracing::debug!(id = question.id, category = %label, "Serving quiz question");

    Ok(Json(NextQuestion {
        success: true,
        question,
        total_questions: candidates.len(),
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
