//! Configuration for the astrologer response generator.

use std::env;

use astro_core::AstrologySystem;

use crate::persona;

/// Default Gemini API base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used for both personas.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for one system's astrologer.
#[derive(Debug, Clone)]
pub struct AstrologerConfig {
    /// The system this persona serves.
    pub system: AstrologySystem,

    /// Gemini API base URL.
    pub api_url: String,

    /// API key. `None` puts the astrologer in pure fallback mode.
    pub api_key: Option<String>,

    /// Model name.
    pub model: String,

    /// Persona instruction sent as the model's system instruction.
    pub system_instruction: String,

    /// Maximum tokens for a generated reply.
    pub max_tokens: u32,

    /// Generation temperature.
    pub temperature: f32,

    /// Per-call HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl AstrologerConfig {
    /// Create the configuration for one system from environment variables.
    ///
    /// Optional environment variables:
    /// - `GEMINI_API_KEY` - credentials; absent means fallback-only mode
    /// - `GEMINI_API_URL` - API base (default: generativelanguage.googleapis.com)
    /// - `GEMINI_MODEL` - model name (default: gemini-1.5-flash)
    /// - `GEMINI_MAX_TOKENS` - reply budget (default: 400)
    /// - `GEMINI_TEMPERATURE` - temperature (default: 0.7)
    /// - `GEMINI_TIMEOUT_SECS` - HTTP timeout (default: 30)
    /// - `ASTRO_VEDIC_PERSONA` / `ASTRO_WESTERN_PERSONA` - persona override
    pub fn for_system(system: AstrologySystem) -> Self {
        let api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty());

        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = env::var("GEMINI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(400);

        let temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.7);

        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let persona_var = match system {
            AstrologySystem::Vedic => "ASTRO_VEDIC_PERSONA",
            AstrologySystem::Western => "ASTRO_WESTERN_PERSONA",
        };
        let system_instruction = env::var(persona_var)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| Self::default_instruction(system).to_string());

        Self {
            system,
            api_url,
            api_key,
            model,
            system_instruction,
            max_tokens,
            temperature,
            timeout_secs,
        }
    }

    /// The built-in persona text for a system.
    pub fn default_instruction(system: AstrologySystem) -> &'static str {
        match system {
            AstrologySystem::Vedic => persona::VEDIC_SYSTEM_INSTRUCTION,
            AstrologySystem::Western => persona::WESTERN_SYSTEM_INSTRUCTION,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Drop any configured credentials (fallback-only mode).
    pub fn without_credentials(mut self) -> Self {
        self.api_key = None;
        self
    }
}
