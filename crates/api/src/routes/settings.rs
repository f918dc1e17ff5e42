//! Account settings endpoints.

use axum::extract::State;
use axum::response::Response;
use orchestrator::UpdateSettings;

use crate::auth::AuthUser;
use crate::envelope::{self, ApiError};
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn get_settings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, ApiError> {
    let settings = state.settings.get_settings(&user.user_id).await?;
    Ok(envelope::success(settings))
}

pub async fn update_settings(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<UpdateSettings>,
) -> Result<Response, ApiError> {
    let settings = state.settings.update_settings(&user.user_id, req).await?;
    Ok(envelope::success(settings))
}
