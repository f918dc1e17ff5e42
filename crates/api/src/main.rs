use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use astro_core::{AstrologySystem, Calculator};
use astro_engine::KerykeionEngine;
use astrologer::{Astrologer, AstrologerConfig};
use database::Database;
use orchestrator::{ChatService, ProfileService, SettingsService};
use tracing::info;

mod auth;
mod envelope;
mod extract;
mod routes;
mod state;

use auth::AuthClient;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let production = env::var("APP_ENV")
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false);
    envelope::set_production(production);

    let addr = env::var("ASTRO_API_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:astro.db?mode=rwc".to_string());

    let db = Database::connect(&database_url)
        .await
        .expect("database connection failed");
    db.migrate().await.expect("database migration failed");

    let calculator: Arc<dyn Calculator> = Arc::new(KerykeionEngine::from_env());
    let vedic = Arc::new(Astrologer::new(AstrologerConfig::for_system(
        AstrologySystem::Vedic,
    )));
    let western = Arc::new(Astrologer::new(AstrologerConfig::for_system(
        AstrologySystem::Western,
    )));

    let auth = AuthClient::from_env().expect("auth configuration failed");

    let state = AppState {
        chat: ChatService::new(db.clone(), vedic, western),
        profiles: ProfileService::new(db.clone(), calculator),
        settings: SettingsService::new(db),
        auth,
    };

    let app = routes::router(state);

    let addr: SocketAddr = addr.parse().expect("Invalid ASTRO_API_ADDR");
    info!(%addr, production, "astrology API listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
