use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Every failure the API reports. The body is always
/// `{"success": false, "error": <code>, "message": <text>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    /// Reported with a 404 status, matching the clients already in use.
    Forbidden,
    NotFound,
    InvalidMethod,
    UnprocessableEntity,
    ServerError,
}

pub type ApiResponse<T> = Result<T, ApiError>;

impl ApiError {
    pub fn code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::InvalidMethod => 405,
            Self::UnprocessableEntity => 422,
            Self::ServerError => 500,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not found",
            Self::InvalidMethod => "Invalid Method",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::ServerError => "Server Error",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Forbidden | Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidMethod => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs a storage failure and maps it to `self`.
    pub fn on_db_error(self) -> impl FnOnce(sqlx::Error) -> ApiError {
        move |error| {
            tracing::error!(%error, status = self.code(), "Database error");
            self
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.code(),
            "message": self.message(),
        });
        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        ApiError::ServerError.on_db_error()(error)
    }
}
