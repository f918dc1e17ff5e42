//! Route handlers, grouped by resource.

mod chat;
mod profiles;
mod settings;

use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;

use crate::envelope;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat::send))
        .route("/chat/history", get(chat::history))
        .route(
            "/chat/messages/:id",
            get(chat::get_message)
                .put(chat::update_message)
                .delete(chat::delete_message),
        )
        .route("/profiles", get(profiles::list).post(profiles::create))
        .route(
            "/profiles/:id",
            get(profiles::get)
                .put(profiles::update)
                .delete(profiles::delete),
        )
        .route("/profiles/:id/primary", post(profiles::set_primary))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .with_state(state)
}

async fn health() -> Response {
    envelope::success(serde_json::json!({ "status": "ok" }))
}
