//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A local account, keyed by the opaque subject id issued by the external
/// auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub account_id: i64,
    /// Opaque bearer-token subject from the auth provider.
    pub user_id: String,
    pub email: Option<String>,
    pub created_at: String,
}

/// Per-account settings, one row per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AccountSettings {
    pub account_id: i64,
    /// e.g. "ENGLISH"
    pub preferred_language: String,
    /// "VEDIC" or "WESTERN"; drives chat dispatch.
    pub astrology_system: String,
    pub timezone: String,
    /// Opaque JSON object.
    pub notification_preferences: String,
    pub theme: String,
    /// The profile used for undirected chat; at most one per account.
    pub primary_profile: Option<i64>,
    pub updated_at: String,
}

/// A person's birth identity, with the persisted subset of both astrology
/// systems' results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub profile_id: i64,
    pub firstname: String,
    pub middlename: Option<String>,
    pub lastname: Option<String>,
    pub gender: String,
    /// YYYY-MM-DD
    pub date_of_birth: String,
    /// HH:MM
    pub time_of_birth: String,
    pub place_of_birth: String,
    pub timezone: Option<String>,
    pub western_sun_sign: Option<String>,
    pub western_moon_sign: Option<String>,
    pub vedic_rasi: Option<String>,
    pub vedic_nakshatra: Option<String>,
    pub vedic_lagna: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// One chat message. Created in USER/BOT pairs; ordering is by creation
/// time, tie-broken by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub message_id: i64,
    pub account_id: i64,
    pub profile_id: Option<i64>,
    /// "USER" or "BOT"
    pub sender_type: String,
    pub content: String,
    /// The system that governed this interaction.
    pub astrology_system: String,
    pub is_deleted: bool,
    pub deleted_at: Option<String>,
    pub created_at: String,
}

/// Field values for a new profile row.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub firstname: String,
    pub middlename: Option<String>,
    pub lastname: Option<String>,
    pub gender: String,
    pub date_of_birth: String,
    pub time_of_birth: String,
    pub place_of_birth: String,
    pub timezone: Option<String>,
    pub western_sun_sign: Option<String>,
    pub western_moon_sign: Option<String>,
    pub vedic_rasi: Option<String>,
    pub vedic_nakshatra: Option<String>,
    pub vedic_lagna: Option<String>,
}

/// Partial profile update; `None` leaves the stored value in place.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub firstname: Option<String>,
    pub middlename: Option<String>,
    pub lastname: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub time_of_birth: Option<String>,
    pub place_of_birth: Option<String>,
    pub timezone: Option<String>,
    pub western_sun_sign: Option<String>,
    pub western_moon_sign: Option<String>,
    pub vedic_rasi: Option<String>,
    pub vedic_nakshatra: Option<String>,
    pub vedic_lagna: Option<String>,
}

/// Partial settings update; `None` leaves the stored value in place.
/// `primary_profile` is handled separately because clearing it (set to NULL)
/// must be distinguishable from leaving it alone.
#[derive(Debug, Clone, Default)]
pub struct SettingsChanges {
    pub preferred_language: Option<String>,
    pub astrology_system: Option<String>,
    pub timezone: Option<String>,
    pub notification_preferences: Option<String>,
    pub theme: Option<String>,
}
