//! HTTP client for the Gemini `generateContent` API.

use std::time::Duration;

use astro_core::{PromptContext, Role};
use tracing::debug;

use crate::api_types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::AstrologerConfig;
use crate::error::AstrologerError;

/// Thin client over the Gemini REST API.
///
/// Holds a connection-pooled [`reqwest::Client`]; cheap to clone.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: AstrologerConfig,
}

impl GeminiClient {
    /// Build a client. Fails when no API key is configured.
    pub fn new(config: AstrologerConfig) -> Result<Self, AstrologerError> {
        if config.api_key.is_none() {
            return Err(AstrologerError::Configuration(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Send the assembled context to the model and return its reply text.
    pub async fn generate(&self, context: &PromptContext) -> Result<String, AstrologerError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AstrologerError::Configuration("missing API key".to_string()))?;

        let request = build_request(&self.config, context);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        );

        debug!(
            model = %self.config.model,
            system = %self.config.system.as_str(),
            history_turns = context.history.len(),
            "sending generateContent request"
        );

        let response = self
            .http
            .post(&url)
            .query(&[("key", key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AstrologerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.first_text()
            .map(|text| text.to_string())
            .ok_or(AstrologerError::EmptyResponse)
    }
}

/// Assemble the wire request: prior turns as user/model messages, then one
/// final user message carrying the facts block and the new question.
fn build_request(config: &AstrologerConfig, context: &PromptContext) -> GenerateContentRequest {
    let mut contents: Vec<Content> = context
        .history
        .iter()
        .map(|turn| match turn.role {
            Role::User => Content::user(turn.text.clone()),
            Role::Bot => Content::model(turn.text.clone()),
        })
        .collect();

    contents.push(Content::user(final_turn(context)));

    GenerateContentRequest {
        system_instruction: Content::system(config.system_instruction.clone()),
        contents,
        generation_config: GenerationConfig {
            max_output_tokens: config.max_tokens,
            temperature: config.temperature,
        },
    }
}

/// The closing user turn: system label, facts block, the question, and the
/// profile's first name when one is selected.
fn final_turn(context: &PromptContext) -> String {
    let mut turn = format!(
        "Astrology System: {}\n\n{}\n\nQuestion: {}",
        context.system.as_str(),
        context.astrology_facts,
        context.question
    );
    if let Some(name) = &context.first_name {
        turn.push_str(&format!("\n\nUser's name: {name}"));
    }
    turn
}
