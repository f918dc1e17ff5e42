//! Profile CRUD endpoints.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use orchestrator::{CreateProfile, UpdateProfile};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::envelope::{self, ApiError};
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let profiles = state
        .profiles
        .list_profiles(&user.user_id, query.limit, query.offset)
        .await?;
    Ok(envelope::success(profiles))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<CreateProfile>,
) -> Result<Response, ApiError> {
    let profile = state
        .profiles
        .create_profile(&user.user_id, user.email.as_deref(), req)
        .await?;
    Ok(envelope::success(profile))
}

pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let profile = state.profiles.get_profile(&user.user_id, id).await?;
    Ok(envelope::success(profile))
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<UpdateProfile>,
) -> Result<Response, ApiError> {
    let profile = state
        .profiles
        .update_profile(&user.user_id, id, req)
        .await?;
    Ok(envelope::success(profile))
}

pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.profiles.delete_profile(&user.user_id, id).await?;
    Ok(envelope::success(serde_json::json!({ "deleted": true })))
}

pub async fn set_primary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.profiles.set_primary(&user.user_id, id).await?;
    Ok(envelope::success(serde_json::json!({ "primary_profile": id })))
}
