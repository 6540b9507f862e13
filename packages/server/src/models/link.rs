use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{double_option, validate_text, validate_url};
use crate::entity::link;
use crate::error::AppError;

/// Request body for link creation. The owner is always the caller.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateLinkRequest {
    /// Absolute http(s) URL, unique per owner.
    #[schema(example = "https://example.com/a")]
    pub url: String,
    #[schema(example = "Example")]
    pub title: Option<String>,
    pub description: Option<String>,
    /// Free-text annotation.
    pub text: Option<String>,
}

/// Validate the payload and return the normalized URL.
pub fn validate_create_link(payload: &CreateLinkRequest) -> Result<String, AppError> {
    let url = validate_url(&payload.url)?;
    validate_text("title", payload.title.as_deref())?;
    validate_text("description", payload.description.as_deref())?;
    validate_text("text", payload.text.as_deref())?;
    Ok(url)
}

/// Partial update. Absent fields are left alone, `null` clears a field.
/// `url` and the owner cannot be changed.
#[derive(Deserialize, Default, PartialEq, Debug, utoipa::ToSchema)]
pub struct UpdateLinkRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub text: Option<Option<String>>,
}

pub fn validate_update_link(payload: &UpdateLinkRequest) -> Result<(), AppError> {
    validate_text("title", new_value(&payload.title))?;
    validate_text("description", new_value(&payload.description))?;
    validate_text("text", new_value(&payload.text))
}

/// The value a PATCH field would set, if any.
fn new_value(field: &Option<Option<String>>) -> Option<&str> {
    field.as_ref().and_then(|v| v.as_deref())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LinkResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "https://example.com/a")]
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<link::Model> for LinkResponse {
    fn from(link: link::Model) -> Self {
        Self {
            id: link.id,
            user_id: link.user_id,
            url: link.url,
            title: link.title,
            description: link.description,
            text: link.text,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
