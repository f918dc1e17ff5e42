//! Engine output document parsing and validation.

use serde::Deserialize;

use astro_core::{
    AstrologySystem, CalculationError, CalculationResult, GeoPoint, VedicResult, WesternResult,
};

/// The raw JSON document the engine prints to stdout.
///
/// The engine emits one flat object for either system; which sign fields are
/// present depends on the `system` tag. Validation happens in
/// [`into_result`](RawDocument::into_result), which refuses partial or
/// mismatched documents rather than propagating them as half-filled results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub success: bool,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub error: Option<String>,

    // Vedic sign fields.
    #[serde(default)]
    pub rasi: Option<String>,
    #[serde(default)]
    pub nakshatra: Option<String>,
    #[serde(default)]
    pub lagna: Option<String>,

    // Shared / Western sign fields.
    #[serde(default)]
    pub sun_sign: Option<String>,
    #[serde(default)]
    pub moon_sign: Option<String>,
    #[serde(default)]
    pub ascendant: Option<String>,

    #[serde(default)]
    pub moon_longitude: Option<f64>,
    #[serde(default)]
    pub ascendant_longitude: Option<f64>,
    #[serde(default)]
    pub sun_longitude: Option<f64>,

    #[serde(default)]
    pub coordinates: Option<RawCoordinates>,
}

#[derive(Debug, Deserialize)]
pub struct RawCoordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// Parse the engine's stdout into a raw document.
pub fn parse_document(stdout: &str) -> Result<RawDocument, CalculationError> {
    serde_json::from_str(stdout.trim()).map_err(|e| CalculationError::Parse(e.to_string()))
}

impl RawDocument {
    /// Validate the document against the requested system and convert it
    /// into a typed result.
    pub fn into_result(
        self,
        requested: AstrologySystem,
    ) -> Result<CalculationResult, CalculationError> {
        if !self.success {
            return Err(CalculationError::Unsuccessful(
                self.error
                    .unwrap_or_else(|| "engine reported failure without detail".to_string()),
            ));
        }

        let tag = self
            .system
            .clone()
            .ok_or_else(|| CalculationError::Parse("missing system tag".to_string()))?;
        match AstrologySystem::parse(&tag) {
            Some(got) if got == requested => {}
            _ => {
                return Err(CalculationError::SystemMismatch {
                    requested,
                    got: tag,
                })
            }
        }

        let moon_longitude = self.required_f64(self.moon_longitude, "moonLongitude")?;
        let ascendant_longitude =
            self.required_f64(self.ascendant_longitude, "ascendantLongitude")?;
        let sun_longitude = self.required_f64(self.sun_longitude, "sunLongitude")?;
        let coordinates = self
            .coordinates
            .as_ref()
            .map(|c| GeoPoint {
                latitude: c.latitude,
                longitude: c.longitude,
                timezone: c.timezone.clone(),
            })
            .ok_or_else(|| CalculationError::Parse("missing coordinates".to_string()))?;

        match requested {
            AstrologySystem::Vedic => Ok(CalculationResult::Vedic(VedicResult {
                rasi: Self::required(self.rasi, "rasi")?,
                nakshatra: Self::required(self.nakshatra, "nakshatra")?,
                lagna: Self::required(self.lagna, "lagna")?,
                sun_sign: Self::required(self.sun_sign, "sunSign")?,
                moon_longitude,
                ascendant_longitude,
                sun_longitude,
                coordinates,
            })),
            AstrologySystem::Western => Ok(CalculationResult::Western(WesternResult {
                sun_sign: Self::required(self.sun_sign, "sunSign")?,
                moon_sign: Self::required(self.moon_sign, "moonSign")?,
                ascendant: Self::required(self.ascendant, "ascendant")?,
                moon_longitude,
                ascendant_longitude,
                sun_longitude,
                coordinates,
            })),
        }
    }

    fn required(value: Option<String>, field: &str) -> Result<String, CalculationError> {
        value.ok_or_else(|| CalculationError::Parse(format!("missing field: {}", field)))
    }

    fn required_f64(&self, value: Option<f64>, field: &str) -> Result<f64, CalculationError> {
        value.ok_or_else(|| CalculationError::Parse(format!("missing field: {}", field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VEDIC_DOC: &str = r#"{
        "success": true,
        "system": "VEDIC",
        "rasi": "Mesha",
        "nakshatra": "Bharani",
        "lagna": "Kataka",
        "sunSign": "Vrishabha",
        "moonLongitude": 21.4,
        "ascendantLongitude": 101.9,
        "sunLongitude": 54.2,
        "coordinates": {"latitude": 13.08, "longitude": 80.27, "timezone": "Asia/Kolkata"},
        "raw_data": {"moon_sign": "Ari", "sun_sign": "Tau", "ascendant_sign": "Can"}
    }"#;

    const WESTERN_DOC: &str = r#"{
        "success": true,
        "system": "WESTERN",
        "sunSign": "Taurus",
        "moonSign": "Aries",
        "ascendant": "Cancer",
        "moonLongitude": 21.4,
        "ascendantLongitude": 101.9,
        "sunLongitude": 54.2,
        "coordinates": {"latitude": 13.08, "longitude": 80.27, "timezone": "Asia/Kolkata"}
    }"#;

    #[test]
    fn test_parse_vedic() {
        let doc = parse_document(VEDIC_DOC).unwrap();
        let result = doc.into_result(AstrologySystem::Vedic).unwrap();
        let vedic = result.as_vedic().unwrap();
        assert_eq!(vedic.rasi, "Mesha");
        assert_eq!(vedic.nakshatra, "Bharani");
        assert_eq!(vedic.lagna, "Kataka");
        assert_eq!(vedic.coordinates.timezone, "Asia/Kolkata");
    }

    #[test]
    fn test_parse_western() {
        let doc = parse_document(WESTERN_DOC).unwrap();
        let result = doc.into_result(AstrologySystem::Western).unwrap();
        let western = result.as_western().unwrap();
        assert_eq!(western.sun_sign, "Taurus");
        assert_eq!(western.ascendant, "Cancer");
    }

    #[test]
    fn test_system_mismatch_rejected() {
        // A Western document must not satisfy a Vedic request, even though
        // parsing alone would succeed.
        let doc = parse_document(WESTERN_DOC).unwrap();
        let err = doc.into_result(AstrologySystem::Vedic).unwrap_err();
        assert!(matches!(err, CalculationError::SystemMismatch { .. }));
    }

    #[test]
    fn test_unsuccessful_document() {
        let doc = parse_document(r#"{"success": false, "error": "Geolocation error"}"#).unwrap();
        let err = doc.into_result(AstrologySystem::Vedic).unwrap_err();
        match err {
            CalculationError::Unsuccessful(msg) => assert!(msg.contains("Geolocation")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_sign_field() {
        let doc = parse_document(
            r#"{
                "success": true,
                "system": "VEDIC",
                "nakshatra": "Bharani",
                "lagna": "Kataka",
                "sunSign": "Vrishabha",
                "moonLongitude": 1.0,
                "ascendantLongitude": 2.0,
                "sunLongitude": 3.0,
                "coordinates": {"latitude": 0.0, "longitude": 0.0, "timezone": "UTC"}
            }"#,
        )
        .unwrap();
        let err = doc.into_result(AstrologySystem::Vedic).unwrap_err();
        assert!(matches!(err, CalculationError::Parse(_)));
    }

    #[test]
    fn test_garbage_output() {
        assert!(matches!(
            parse_document("Traceback (most recent call last):"),
            Err(CalculationError::Parse(_))
        ));
    }
}
