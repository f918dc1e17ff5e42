//! Dual-system profile enrichment.
//!
//! Every profile stores the persisted subset of both systems' results, so
//! the account's system preference can change without recomputation. The two
//! calculations run concurrently; either failure aborts the whole operation
//! and nothing is persisted.

use std::sync::Arc;

use astro_core::{AstrologySystem, BirthInput, CalculationError, Calculator};
use tracing::debug;

use crate::error::Result;

/// The persisted subset of a dual-system calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstrologyFields {
    pub western_sun_sign: String,
    pub western_moon_sign: String,
    pub vedic_rasi: String,
    pub vedic_nakshatra: String,
    pub vedic_lagna: String,
    /// IANA timezone resolved from the birth place.
    pub timezone: String,
}

/// Compute both systems for one birth input, concurrently.
pub async fn compute_both(
    calculator: &Arc<dyn Calculator>,
    input: &BirthInput,
) -> Result<AstrologyFields> {
    debug!(place = %input.place, "computing dual-system enrichment");

    let (vedic, western) = tokio::join!(
        calculator.calculate(input, AstrologySystem::Vedic),
        calculator.calculate(input, AstrologySystem::Western),
    );
    let vedic = vedic?;
    let western = western?;

    let vedic = vedic.as_vedic().ok_or(CalculationError::SystemMismatch {
        requested: AstrologySystem::Vedic,
        got: vedic.system().to_string(),
    })?;
    let western = western
        .as_western()
        .ok_or(CalculationError::SystemMismatch {
            requested: AstrologySystem::Western,
            got: western.system().to_string(),
        })?;

    Ok(AstrologyFields {
        western_sun_sign: western.sun_sign.clone(),
        western_moon_sign: western.moon_sign.clone(),
        vedic_rasi: vedic.rasi.clone(),
        vedic_nakshatra: vedic.nakshatra.clone(),
        vedic_lagna: vedic.lagna.clone(),
        timezone: vedic.coordinates.timezone.clone(),
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::StubCalculator;
    use super::*;
    use crate::error::ServiceError;
    use chrono::{NaiveDate, NaiveTime};

    fn input() -> BirthInput {
        BirthInput::new(
            NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            "Chennai, India",
        )
    }

    #[tokio::test]
    async fn test_both_systems_collected() {
        let calculator: Arc<dyn Calculator> = Arc::new(StubCalculator::ok());
        let fields = compute_both(&calculator, &input()).await.unwrap();

        assert_eq!(fields.vedic_rasi, "Mesha");
        assert_eq!(fields.vedic_nakshatra, "Bharani");
        assert_eq!(fields.vedic_lagna, "Kataka");
        assert_eq!(fields.western_sun_sign, "Taurus");
        assert_eq!(fields.western_moon_sign, "Aries");
        assert_eq!(fields.timezone, "Asia/Kolkata");
    }

    #[tokio::test]
    async fn test_failure_aborts() {
        let calculator: Arc<dyn Calculator> = Arc::new(StubCalculator::failing());
        let err = compute_both(&calculator, &input()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Calculation(_)));
    }
}
