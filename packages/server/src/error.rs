use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// Credential scheme advertised on 401 responses.
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `API_KEY_MISSING`,
    /// `API_KEY_INVALID`, `NOT_FOUND`, `EMAIL_TAKEN`, `CONFLICT`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "URL must use the http or https scheme")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    ApiKeyMissing,
    ApiKeyInvalid,
    /// Absent, or owned by someone else. Both render identically.
    NotFound(String),
    EmailTaken,
    Conflict(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::ApiKeyMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "API_KEY_MISSING",
                    message: "Missing X-API-Key header".into(),
                },
            ),
            AppError::ApiKeyInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "API_KEY_INVALID",
                    message: "Invalid API key".into(),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::EmailTaken => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "EMAIL_TAKEN",
                    message: "Email already registered".into(),
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let unauthorized = matches!(self, AppError::ApiKeyMissing | AppError::ApiKeyInvalid);

        let (status, body) = self.status_and_body();

        if unauthorized {
            (
                status,
                [(header::WWW_AUTHENTICATE, API_KEY_SCHEME)],
                Json(body),
            )
                .into_response()
        } else {
            (status, Json(body)).into_response()
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
