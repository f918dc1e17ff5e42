//! The per-system response generator.

use astro_core::{AstrologySystem, PromptContext};
use tracing::warn;

use crate::client::GeminiClient;
use crate::config::AstrologerConfig;
use crate::fallback;

/// Generates replies for one astrology system.
///
/// Construct one per system at startup. When credentials are configured the
/// model is consulted; otherwise, or on any model failure, the deterministic
/// keyword fallback answers instead. [`Astrologer::respond`] therefore never
/// fails.
pub struct Astrologer {
    system: AstrologySystem,
    client: Option<GeminiClient>,
}

impl Astrologer {
    /// Build an astrologer from its configuration.
    ///
    /// A missing API key is not an error; the astrologer runs in
    /// fallback-only mode.
    pub fn new(config: AstrologerConfig) -> Self {
        let system = config.system;
        let client = match GeminiClient::new(config) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!(
                    system = %system.as_str(),
                    error = %err,
                    "model unavailable, astrologer will use canned responses"
                );
                None
            }
        };
        Self { system, client }
    }

    /// Build an astrologer that never contacts the model.
    pub fn fallback_only(system: AstrologySystem) -> Self {
        Self {
            system,
            client: None,
        }
    }

    /// The system this astrologer serves.
    pub fn system(&self) -> AstrologySystem {
        self.system
    }

    /// Whether a model client is configured.
    pub fn has_model(&self) -> bool {
        self.client.is_some()
    }

    /// Produce a reply for the assembled context. Infallible: model errors
    /// degrade to the keyword fallback for the same question.
    pub async fn respond(&self, context: &PromptContext) -> String {
        debug_assert_eq!(context.system, self.system);

        if let Some(client) = &self.client {
            match client.generate(context).await {
                Ok(text) => return text,
                Err(err) => {
                    warn!(
                        system = %self.system.as_str(),
                        error = %err,
                        "model call failed, using canned response"
                    );
                }
            }
        }

        fallback::fallback_reply(
            self.system,
            &context.question,
            context.first_name.as_deref(),
        )
    }
}
