use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::validate_email;
use crate::entity::user;
use crate::error::AppError;

/// Request body for user creation.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    /// Email address, unique across all users.
    #[schema(example = "a@x.com")]
    pub email: String,
}

/// Validate the payload and return the normalized email.
pub fn validate_create_user(payload: &CreateUserRequest) -> Result<String, AppError> {
    validate_email(&payload.email)
}

/// Public view of a user. Never includes the API key.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "a@x.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response to user creation, the only one that carries the API key.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserWithApiKeyResponse {
    pub id: Uuid,
    #[schema(example = "a@x.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Send as `X-API-Key` on authenticated requests. Cannot be retrieved again.
    #[schema(example = "3f9c1e0b6d2a4c8e9f7b5a3d1c0e2f4a6b8d0c2e4f6a8b0d2c4e6f8a0b2d4c6e")]
    pub api_key: String,
}

impl From<user::Model> for UserWithApiKeyResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
            api_key: user.api_key,
        }
    }
}
