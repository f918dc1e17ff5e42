//! Core types and traits for the astrology chat backend.
//!
//! This crate provides the shared vocabulary used by the calculation engine,
//! the response generator, and the orchestration layer:
//!
//! - [`AstrologySystem`] - the Vedic/Western selector that forks behavior
//! - [`BirthInput`] - normalized birth data fed to a calculation
//! - [`CalculationResult`] - tagged union of [`VedicResult`] / [`WesternResult`]
//! - [`Calculator`] - the async seam over the external ephemeris engine
//! - [`PromptContext`] - assembled per-turn conversational context
//!
//! # Example
//!
//! ```rust
//! use astro_core::{AstrologySystem, BirthInput, CalculationResult, Calculator};
//! use astro_core::CalculationError;
//! use async_trait::async_trait;
//!
//! struct FixedCalculator;
//!
//! #[async_trait]
//! impl Calculator for FixedCalculator {
//!     async fn calculate(
//!         &self,
//!         _input: &BirthInput,
//!         system: AstrologySystem,
//!     ) -> Result<CalculationResult, CalculationError> {
//!         Err(CalculationError::Unavailable("no engine".to_string()))
//!     }
//! }
//! ```

mod birth;
mod calculator;
mod context;
mod error;
mod result;
mod system;

pub use birth::BirthInput;
pub use calculator::Calculator;
pub use context::{HistoryTurn, PromptContext, Role};
pub use error::CalculationError;
pub use result::{CalculationResult, GeoPoint, VedicResult, WesternResult};
pub use system::AstrologySystem;

// Re-export async_trait for implementors of `Calculator`.
pub use async_trait::async_trait;
