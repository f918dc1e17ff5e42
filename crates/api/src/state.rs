//! Shared application state, built once in `main`.

use orchestrator::{ChatService, ProfileService, SettingsService};

use crate::auth::AuthClient;

#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub profiles: ProfileService,
    pub settings: SettingsService,
    pub auth: AuthClient,
}
