//! Unified chat endpoints. System dispatch happens inside the service.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::envelope::{self, ApiError};
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    pub profile_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub profile_id: Option<i64>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct UpdateMessageRequest {
    pub content: String,
}

pub async fn send(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<SendMessageRequest>,
) -> Result<Response, ApiError> {
    let pair = state
        .chat
        .send_message(
            &user.user_id,
            user.email.as_deref(),
            req.profile_id,
            &req.content,
        )
        .await?;
    Ok(envelope::success(pair))
}

pub async fn history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Response, ApiError> {
    let page = state
        .chat
        .get_history(&user.user_id, query.profile_id, query.limit, query.offset)
        .await?;
    Ok(envelope::success(page))
}

pub async fn get_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let message = state.chat.get_message(&user.user_id, id).await?;
    Ok(envelope::success(message))
}

pub async fn update_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<UpdateMessageRequest>,
) -> Result<Response, ApiError> {
    let message = state
        .chat
        .update_message(&user.user_id, id, &req.content)
        .await?;
    Ok(envelope::success(message))
}

pub async fn delete_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.chat.delete_message(&user.user_id, id).await?;
    Ok(envelope::success(serde_json::json!({ "deleted": true })))
}
