use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::user::{
    CreateUserRequest, UserResponse, UserWithApiKeyResponse, validate_create_user,
};
use crate::state::AppState;
use crate::utils::api_key::generate_api_key;

#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    operation_id = "createUser",
    summary = "Create a user",
    description = "Registers an email address and returns the new user together with a freshly generated API key. The key is only ever shown in this response.",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserWithApiKeyResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Email already registered (EMAIL_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = validate_create_user(&payload)?;

    let now = chrono::Utc::now();
    let new_user = user::ActiveModel {
        id: Set(Uuid::now_v7()),
        email: Set(email),
        api_key: Set(generate_api_key()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    // The unique index on `email` is the only duplicate check.
    let user = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if is_email_violation(&detail) => {
            tracing::debug!("Duplicate email rejected by unique constraint");
            AppError::EmailTaken
        }
        _ => AppError::from(e),
    })?;

    tracing::info!(user_id = %user.id, "user created");

    Ok((
        StatusCode::CREATED,
        Json(UserWithApiKeyResponse::from(user)),
    ))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Users",
    operation_id = "getCurrentUser",
    summary = "Get the authenticated user",
    description = "Returns the caller's own record. The API key is not included.",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(auth_user), fields(user_id = %auth_user.id()))]
pub async fn me(auth_user: AuthUser) -> Json<UserResponse> {
    Json(auth_user.user.into())
}

/// Whether a unique-violation message names the email index. Any other
/// violation (an API key collision) is not the caller's fault.
fn is_email_violation(detail: &str) -> bool {
    detail.contains(user::EMAIL_UNIQUE_INDEX)
}
