//! Astrologer response generation.
//!
//! One [`Astrologer`] instance exists per astrology system, configured with
//! that system's persona. [`Astrologer::respond`] never fails: when Gemini
//! credentials are configured it sends the assembled context to the model
//! and returns its text; on missing credentials or any model failure it
//! falls back to a deterministic, keyword-matched canned response for the
//! same system.
//!
//! # Example
//!
//! ```rust
//! use astro_core::AstrologySystem;
//! use astrologer::{Astrologer, AstrologerConfig};
//!
//! // No API key: the astrologer runs in pure fallback mode.
//! let config = AstrologerConfig::for_system(AstrologySystem::Western);
//! let astrologer = Astrologer::new(config);
//! ```

mod api_types;
mod astrologer;
mod client;
mod config;
mod error;
mod fallback;
mod persona;

pub use astrologer::Astrologer;
pub use client::GeminiClient;
pub use config::AstrologerConfig;
pub use error::AstrologerError;
pub use fallback::{apology, fallback_reply};

// Re-export the context types callers assemble.
pub use astro_core::{AstrologySystem, HistoryTurn, PromptContext, Role};
