//! The calculation seam.

use async_trait::async_trait;

use crate::{AstrologySystem, BirthInput, CalculationError, CalculationResult};

/// Async interface over an astrology calculation backend.
///
/// The production implementation spawns an external ephemeris process; tests
/// substitute fixed results. Each call is independent and stateless from the
/// caller's point of view, and a result is always tagged with the requested
/// system (implementations must reject mismatched output).
#[async_trait]
pub trait Calculator: Send + Sync {
    /// Run one calculation for the given birth data and system.
    async fn calculate(
        &self,
        input: &BirthInput,
        system: AstrologySystem,
    ) -> Result<CalculationResult, CalculationError>;
}
