//! The astrology system selector.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which astrological system governs a calculation or a chat interaction.
///
/// The two systems differ in zodiac reference frame (sidereal vs. tropical),
/// in which profile fields are relevant, and in which persona answers chat
/// messages. Behavior forks on this tag everywhere; it is never implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AstrologySystem {
    /// Sidereal zodiac: rasi, nakshatra, lagna.
    Vedic,
    /// Tropical zodiac: sun sign, moon sign, ascendant.
    Western,
}

impl AstrologySystem {
    /// Wire/database representation ("VEDIC" or "WESTERN").
    pub fn as_str(&self) -> &'static str {
        match self {
            AstrologySystem::Vedic => "VEDIC",
            AstrologySystem::Western => "WESTERN",
        }
    }

    /// Parse the wire representation. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "VEDIC" => Some(AstrologySystem::Vedic),
            "WESTERN" => Some(AstrologySystem::Western),
            _ => None,
        }
    }

    /// Lowercase display name used in user-facing text.
    pub fn display_name(&self) -> &'static str {
        match self {
            AstrologySystem::Vedic => "vedic",
            AstrologySystem::Western => "western",
        }
    }
}

impl Default for AstrologySystem {
    /// Accounts without a stored preference default to Vedic.
    fn default() -> Self {
        AstrologySystem::Vedic
    }
}

impl fmt::Display for AstrologySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert_eq!(
            AstrologySystem::parse(AstrologySystem::Vedic.as_str()),
            Some(AstrologySystem::Vedic)
        );
        assert_eq!(
            AstrologySystem::parse(AstrologySystem::Western.as_str()),
            Some(AstrologySystem::Western)
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(AstrologySystem::parse("vedic"), Some(AstrologySystem::Vedic));
        assert_eq!(
            AstrologySystem::parse(" Western "),
            Some(AstrologySystem::Western)
        );
        assert_eq!(AstrologySystem::parse("sidereal"), None);
    }

    #[test]
    fn test_default_is_vedic() {
        assert_eq!(AstrologySystem::default(), AstrologySystem::Vedic);
    }

    #[test]
    fn test_serde_uppercase() {
        let json = serde_json::to_string(&AstrologySystem::Vedic).unwrap();
        assert_eq!(json, "\"VEDIC\"");
        let parsed: AstrologySystem = serde_json::from_str("\"WESTERN\"").unwrap();
        assert_eq!(parsed, AstrologySystem::Western);
    }
}
