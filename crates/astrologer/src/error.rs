use thiserror::Error;

/// Failures inside the Gemini client. Callers never see these from
/// [`crate::Astrologer::respond`]; they are absorbed into the fallback path.
#[derive(Debug, Error)]
pub enum AstrologerError {
    #[error("astrologer misconfigured: {0}")]
    Configuration(String),

    #[error("model request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("model API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned no usable text")]
    EmptyResponse,
}
