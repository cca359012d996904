use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_category, questions::get_questions_for_category},
        Question,
    },
    server::{
        app::AppState,
        error::{ApiError, ApiResponse},
        extract::IdPath,
    },
};

use super::category_map;

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    #[serde(rename = "currentCategory")]
    current_category: Option<String>,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesBody>> {
    let categories = category_map(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesBody {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

// An unknown category and a category without questions both end up as 404.
async fn category_questions(
    State(pool): State<SqlitePool>,
    IdPath(category_id): IdPath,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    let questions = get_questions_for_category(&pool, category_id).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let current_category = get_category(&pool, category_id).await?.map(|c| c.kind);
    Ok(Json(CategoryQuestionsBody {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
