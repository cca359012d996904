use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, NewQuestion, Question},
    server::{
        app::AppState,
        error::{ApiError, ApiResponse},
        extract::{ApiJson, IdPath, PageParams},
        pagination::Pagination,
    },
};

use super::category_map;

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct DeletedBody {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize)]
struct CreatedBody {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    #[serde(rename = "currentCategory")]
    current_category: Option<String>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
}

/// One page of questions ordered by id, plus the unpaginated total.
async fn paginated(
    pool: &SqlitePool,
    pagination: Pagination,
) -> sqlx::Result<(Vec<Question>, i64)> {
    let page = match pagination.window() {
        Some((limit, offset)) => questions::get_questions_page(pool, limit, offset).await?,
        None => vec![],
    };
    let total = questions::count_questions(pool).await?;
    Ok((page, total))
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    PageParams(pagination): PageParams,
) -> ApiResponse<Json<QuestionsPage>> {
    let (questions, total_questions) = paginated(&pool, pagination).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsPage {
        success: true,
        questions,
        total_questions,
        categories: category_map(&pool).await?,
        current_category: None,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath,
    PageParams(pagination): PageParams,
) -> ApiResponse<Json<DeletedBody>> {
    let on_error = ApiError::UnprocessableEntity;
    let question = questions::get_question(&pool, id)
        .await
        .map_err(on_error.on_db_error())?
        .ok_or(ApiError::NotFound)?;
    if !questions::delete_question(&pool, question.id)
        .await
        .map_err(on_error.on_db_error())?
    {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "Deleted question");

    let (questions, total_questions) = paginated(&pool, pagination)
        .await
        .map_err(on_error.on_db_error())?;
    Ok(Json(DeletedBody {
        success: true,
        deleted: id,
        questions,
        total_questions,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    PageParams(pagination): PageParams,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> ApiResponse<Json<CreatedBody>> {
    let on_error = ApiError::InvalidMethod;
    let Json(new_question) = body.map_err(|rejection| {
        tracing::info!(%rejection, "Rejected question body");
        on_error
    })?;
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(on_error.on_db_error())?;
    tracing::info!(id, "Created question");

    let (questions, total_questions) = paginated(&pool, pagination)
        .await
        .map_err(on_error.on_db_error())?;
    Ok(Json(CreatedBody {
        success: true,
        created: id,
        questions,
        total_questions,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let term = body.search_term.unwrap_or_default();
    let questions = questions::search_questions(&pool, &term).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SearchResults {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
