use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::user;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's static API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Caller resolved from the `X-API-Key` header.
///
/// Add this as a handler parameter to require authentication. Every request
/// re-authenticates; nothing is cached between requests.
pub struct AuthUser {
    pub user: user::Model,
}

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::ApiKeyMissing)?;

        let user = user::Entity::find()
            .filter(user::Column::ApiKey.eq(api_key))
            .one(&state.db)
            .await?
            .ok_or(AppError::ApiKeyInvalid)?;

        tracing::debug!(user_id = %user.id, "authenticated request");

        Ok(AuthUser { user })
    }
}
