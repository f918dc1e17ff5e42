//! Calculation result shapes.

use serde::{Deserialize, Serialize};

use crate::AstrologySystem;

/// Geocoded coordinates and timezone resolved by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name, e.g. "Asia/Kolkata".
    pub timezone: String,
}

/// Sidereal (Vedic) calculation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VedicResult {
    /// Moon sign (rasi), e.g. "Mesha".
    pub rasi: String,
    /// Birth star, e.g. "Ashwini".
    pub nakshatra: String,
    /// Ascendant sign (lagna).
    pub lagna: String,
    /// Sun sign in the sidereal frame.
    pub sun_sign: String,
    pub moon_longitude: f64,
    pub ascendant_longitude: f64,
    pub sun_longitude: f64,
    pub coordinates: GeoPoint,
}

/// Tropical (Western) calculation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WesternResult {
    pub sun_sign: String,
    pub moon_sign: String,
    /// Rising sign.
    pub ascendant: String,
    pub moon_longitude: f64,
    pub ascendant_longitude: f64,
    pub sun_longitude: f64,
    pub coordinates: GeoPoint,
}

/// A calculation result, tagged by the system that produced it.
///
/// The two variants are disjoint: there is no way to read a Vedic-only field
/// off a Western result. Consumers match exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system")]
pub enum CalculationResult {
    #[serde(rename = "VEDIC")]
    Vedic(VedicResult),
    #[serde(rename = "WESTERN")]
    Western(WesternResult),
}

impl CalculationResult {
    /// The system that produced this result.
    pub fn system(&self) -> AstrologySystem {
        match self {
            CalculationResult::Vedic(_) => AstrologySystem::Vedic,
            CalculationResult::Western(_) => AstrologySystem::Western,
        }
    }

    /// Borrow the Vedic variant, if this is one.
    pub fn as_vedic(&self) -> Option<&VedicResult> {
        match self {
            CalculationResult::Vedic(v) => Some(v),
            CalculationResult::Western(_) => None,
        }
    }

    /// Borrow the Western variant, if this is one.
    pub fn as_western(&self) -> Option<&WesternResult> {
        match self {
            CalculationResult::Western(w) => Some(w),
            CalculationResult::Vedic(_) => None,
        }
    }
}
