//! Process adapter for the external astrology calculation engine.
//!
//! The engine is a Python script built on Kerykeion. It is invoked once per
//! calculation with positional arguments
//! `[name, YYYY-MM-DD, HH:MM, place, VEDIC|WESTERN]`, prints a single JSON
//! document to stdout, and exits 0 on success. This crate owns the spawn,
//! the bounded timeout, and the validation of the output document; callers
//! only see [`astro_core::Calculator`].
//!
//! Keeping the subprocess boundary behind the trait means the engine can be
//! swapped for an in-process implementation without touching callers.
//!
//! # Example
//!
//! ```rust,no_run
//! use astro_engine::{EngineConfig, KerykeionEngine};
//!
//! # fn main() {
//! let engine = KerykeionEngine::new(EngineConfig::default());
//! # }
//! ```

mod config;
mod engine;
mod wire;

pub use config::EngineConfig;
pub use engine::KerykeionEngine;

// Re-export the seam types for convenience.
pub use astro_core::{AstrologySystem, BirthInput, CalculationError, CalculationResult, Calculator};
