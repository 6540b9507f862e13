use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::link;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::link::{
    CreateLinkRequest, LinkResponse, UpdateLinkRequest, validate_create_link,
    validate_update_link,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Links",
    operation_id = "listLinks",
    summary = "List the caller's links",
    description = "Returns every link owned by the caller, most recently created first. Not paginated.",
    responses(
        (status = 200, description = "Owned links", body = Vec<LinkResponse>),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.id()))]
pub async fn list_links(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = auth_user.user.links(&state.db).await?;
    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Links",
    operation_id = "createLink",
    summary = "Save a link",
    description = "Stores a URL for the caller. Each caller can store a given URL once; a second attempt returns 409 CONFLICT.",
    request_body = CreateLinkRequest,
    responses(
        (status = 201, description = "Link created", body = LinkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 409, description = "URL already saved by this user (CONFLICT)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.id()))]
pub async fn create_link(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let url = validate_create_link(&payload)?;

    let now = chrono::Utc::now();
    let new_link = link::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(auth_user.id()),
        url: Set(url),
        title: Set(payload.title),
        description: Set(payload.description),
        text: Set(payload.text),
        created_at: Set(now),
        updated_at: Set(now),
    };

    // `unique_user_url` decides concurrent duplicates.
    let model = new_link.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Duplicate link rejected by unique constraint");
            AppError::Conflict("Link with this URL already exists".into())
        }
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(LinkResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Links",
    operation_id = "getLink",
    summary = "Get a link by ID",
    description = "Returns one of the caller's links. Links owned by other users are reported as not found.",
    params(("id" = Uuid, Path, description = "Link ID")),
    responses(
        (status = 200, description = "Link details", body = LinkResponse),
        (status = 400, description = "Malformed ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "Link not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.id()))]
pub async fn get_link(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<LinkResponse>, AppError> {
    let model = find_owned_link(&state.db, id, auth_user.id()).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Links",
    operation_id = "updateLink",
    summary = "Update a link",
    description = "Partially updates title, description and text. Absent fields are left unchanged and `null` clears a field. The URL and owner cannot be changed. An empty payload returns the link unchanged.",
    params(("id" = Uuid, Path, description = "Link ID")),
    request_body = UpdateLinkRequest,
    responses(
        (status = 200, description = "Link updated", body = LinkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "Link not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.id()))]
pub async fn update_link(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    validate_update_link(&payload)?;

    if payload == UpdateLinkRequest::default() {
        let existing = find_owned_link(&state.db, id, auth_user.id()).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_owned_link(&txn, id, auth_user.id()).await?;
    let mut active: link::ActiveModel = existing.into();

    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(text) = payload.text {
        active.text = Set(text);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

async fn find_owned_link<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    owner: Uuid,
) -> Result<link::Model, AppError> {
    link::Entity::find_owned(id, owner)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Link not found".into()))
}
