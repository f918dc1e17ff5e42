//! Account settings storage.

use sqlx::SqlitePool;

use crate::models::{AccountSettings, SettingsChanges};
use crate::{DatabaseError, Result};

/// Get the settings row for an account.
pub async fn get_settings(pool: &SqlitePool, account_id: i64) -> Result<AccountSettings> {
    let record = sqlx::query_as::<_, AccountSettings>(
        r#"
        SELECT account_id, preferred_language, astrology_system, timezone,
               notification_preferences, theme, primary_profile, updated_at
        FROM account_settings
        WHERE account_id = ?
        "#,
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?;

    record.ok_or_else(|| DatabaseError::not_found("account settings", account_id))
}

/// Apply a partial settings update. Absent fields keep their stored value.
pub async fn update_settings(
    pool: &SqlitePool,
    account_id: i64,
    changes: &SettingsChanges,
) -> Result<AccountSettings> {
    sqlx::query(
        r#"
        UPDATE account_settings SET
            preferred_language = COALESCE(?, preferred_language),
            astrology_system = COALESCE(?, astrology_system),
            timezone = COALESCE(?, timezone),
            notification_preferences = COALESCE(?, notification_preferences),
            theme = COALESCE(?, theme),
            updated_at = datetime('now')
        WHERE account_id = ?
        "#,
    )
    .bind(changes.preferred_language.as_deref())
    .bind(changes.astrology_system.as_deref())
    .bind(changes.timezone.as_deref())
    .bind(changes.notification_preferences.as_deref())
    .bind(changes.theme.as_deref())
    .bind(account_id)
    .execute(pool)
    .await?;

    get_settings(pool, account_id).await
}

/// Set or clear the primary profile reference.
pub async fn set_primary_profile(
    pool: &SqlitePool,
    account_id: i64,
    profile_id: Option<i64>,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE account_settings
        SET primary_profile = ?, updated_at = datetime('now')
        WHERE account_id = ?
        "#,
    )
    .bind(profile_id)
    .bind(account_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("account settings", account_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{account, Database};

    async fn test_db() -> (Database, i64) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let acct = account::get_or_create_account(db.pool(), "subject-1", None)
            .await
            .unwrap();
        (db, acct.account_id)
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (db, account_id) = test_db().await;

        let changes = SettingsChanges {
            astrology_system: Some("WESTERN".to_string()),
            ..Default::default()
        };
        let settings = update_settings(db.pool(), account_id, &changes)
            .await
            .unwrap();

        assert_eq!(settings.astrology_system, "WESTERN");
        // Untouched defaults survive.
        assert_eq!(settings.preferred_language, "ENGLISH");
        assert_eq!(settings.theme, "light");
    }

    #[tokio::test]
    async fn test_primary_profile_set_and_clear() {
        let (db, account_id) = test_db().await;

        let profile = crate::profile::insert_profile(
            db.pool(),
            &crate::models::NewProfile {
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

        set_primary_profile(db.pool(), account_id, Some(profile.profile_id))
            .await
            .unwrap();
        let settings = get_settings(db.pool(), account_id).await.unwrap();
        assert_eq!(settings.primary_profile, Some(profile.profile_id));

        set_primary_profile(db.pool(), account_id, None).await.unwrap();
        let settings = get_settings(db.pool(), account_id).await.unwrap();
        assert!(settings.primary_profile.is_none());
    }

    #[tokio::test]
    async fn test_set_primary_for_missing_account() {
        let (db, _) = test_db().await;
        let result = set_primary_profile(db.pool(), 9999, Some(1)).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
