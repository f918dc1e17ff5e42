//! Account settings service.

use astro_core::AstrologySystem;
use database::models::{AccountSettings, SettingsChanges};
use database::{account, profile, settings, Database};
use serde::Deserialize;

use crate::error::{Result, ServiceError};

/// Partial settings update payload. `primary_profile` uses a double option:
/// absent leaves it alone, explicit null clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettings {
    pub preferred_language: Option<String>,
    pub astrology_system: Option<String>,
    pub timezone: Option<String>,
    pub notification_preferences: Option<serde_json::Value>,
    pub theme: Option<String>,
    #[serde(default, with = "double_option")]
    pub primary_profile: Option<Option<i64>>,
}

/// Distinguishes an absent `primary_profile` key from an explicit null.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(de: D) -> Result<Option<Option<i64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<i64>::deserialize(de).map(Some)
    }
}

/// Settings operations, scoped to the calling account.
#[derive(Clone)]
pub struct SettingsService {
    db: Database,
}

impl SettingsService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The caller's settings, created with defaults on first touch.
    pub async fn get_settings(&self, user_id: &str) -> Result<AccountSettings> {
        let acct = account::get_or_create_account(self.db.pool(), user_id, None).await?;
        Ok(settings::get_settings(self.db.pool(), acct.account_id).await?)
    }

    /// Apply a partial update. The system preference must parse; a primary
    /// profile reference must point at one of the caller's live profiles.
    pub async fn update_settings(
        &self,
        user_id: &str,
        req: UpdateSettings,
    ) -> Result<AccountSettings> {
        let acct = account::get_or_create_account(self.db.pool(), user_id, None).await?;

        let astrology_system = req
            .astrology_system
            .as_deref()
            .map(|s| {
                AstrologySystem::parse(s)
                    .map(|sys| sys.as_str().to_string())
                    .ok_or_else(|| {
                        ServiceError::validation("astrology_system must be VEDIC or WESTERN")
                    })
            })
            .transpose()?;

        let notification_preferences = req
            .notification_preferences
            .map(|v| {
                v.is_object()
                    .then(|| v.to_string())
                    .ok_or_else(|| {
                        ServiceError::validation("notification_preferences must be an object")
                    })
            })
            .transpose()?;

        let changes = SettingsChanges {
            preferred_language: req.preferred_language,
            astrology_system,
            timezone: req.timezone,
            notification_preferences,
            theme: req.theme,
        };
        let mut updated =
            settings::update_settings(self.db.pool(), acct.account_id, &changes).await?;

        if let Some(primary) = req.primary_profile {
            if let Some(profile_id) = primary {
                let owned =
                    profile::has_membership(self.db.pool(), acct.account_id, profile_id).await?;
                if !owned {
                    return Err(ServiceError::not_found(format!(
                        "profile {profile_id} not found"
                    )));
                }
            }
            settings::set_primary_profile(self.db.pool(), acct.account_id, primary).await?;
            updated = settings::get_settings(self.db.pool(), acct.account_id).await?;
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::test_support::StubCalculator;
    use crate::profiles::{CreateProfile, ProfileService};
    use std::sync::Arc;

    async fn service() -> (SettingsService, ProfileService) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        (
            SettingsService::new(db.clone()),
            ProfileService::new(db, Arc::new(StubCalculator::ok())),
        )
    }

    #[tokio::test]
    async fn test_defaults_on_first_touch() {
        let (svc, _) = service().await;
        let settings = svc.get_settings("subject-1").await.unwrap();

        assert_eq!(settings.preferred_language, "ENGLISH");
        assert_eq!(settings.astrology_system, "VEDIC");
        assert_eq!(settings.timezone, "UTC");
        assert_eq!(settings.notification_preferences, "{}");
        assert_eq!(settings.theme, "light");
    }

    #[tokio::test]
    async fn test_partial_update_normalizes_system() {
        let (svc, _) = service().await;

        let updated = svc
            .update_settings(
                "subject-1",
                UpdateSettings {
                    astrology_system: Some("western".to_string()),
                    theme: Some("dark".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.astrology_system, "WESTERN");
        assert_eq!(updated.theme, "dark");
        assert_eq!(updated.preferred_language, "ENGLISH");
    }

    #[tokio::test]
    async fn test_invalid_system_rejected() {
        let (svc, _) = service().await;
        let err = svc
            .update_settings(
                "subject-1",
                UpdateSettings {
                    astrology_system: Some("sidereal".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_primary_profile_must_be_owned() {
        let (svc, profiles) = service().await;
        let foreign = profiles
            .create_profile(
                "subject-2",
                None,
                CreateProfile {
                    firstname: "Ravi".to_string(),
                    gender: "MALE".to_string(),
                    date_of_birth: "1985-01-01".to_string(),
                    time_of_birth: "06:00".to_string(),
                    place_of_birth: "Mumbai, India".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = svc
            .update_settings(
                "subject-1",
                UpdateSettings {
                    primary_profile: Some(Some(foreign.profile.profile_id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_primary_profile_cleared_with_null() {
        let (svc, profiles) = service().await;
        let created = profiles
            .create_profile(
                "subject-1",
                None,
                CreateProfile {
                    firstname: "Asha".to_string(),
                    gender: "FEMALE".to_string(),
                    date_of_birth: "1990-05-15".to_string(),
                    time_of_birth: "10:30".to_string(),
                    place_of_birth: "Chennai, India".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(created.is_primary);

        let updated = svc
            .update_settings(
                "subject-1",
                UpdateSettings {
                    primary_profile: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.primary_profile.is_none());
    }

    #[tokio::test]
    async fn test_notification_preferences_must_be_object() {
        let (svc, _) = service().await;
        let err = svc
            .update_settings(
                "subject-1",
                UpdateSettings {
                    notification_preferences: Some(serde_json::json!(["not", "an", "object"])),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let updated = svc
            .update_settings(
                "subject-1",
                UpdateSettings {
                    notification_preferences: Some(serde_json::json!({"daily": true})),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.notification_preferences.contains("daily"));
    }
}
