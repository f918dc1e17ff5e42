//! Profile and account-membership storage.

use sqlx::SqlitePool;

use crate::models::{NewProfile, Profile, ProfileChanges};
use crate::{DatabaseError, Result};

const PROFILE_COLUMNS: &str = r#"
    profile_id, firstname, middlename, lastname, gender,
    date_of_birth, time_of_birth, place_of_birth, timezone,
    western_sun_sign, western_moon_sign,
    vedic_rasi, vedic_nakshatra, vedic_lagna,
    is_deleted, deleted_at, created_at, updated_at
"#;

/// Insert a new profile row.
pub async fn insert_profile(pool: &SqlitePool, profile: &NewProfile) -> Result<Profile> {
    let id = sqlx::query(
        r#"
        INSERT INTO profiles (
            firstname, middlename, lastname, gender,
            date_of_birth, time_of_birth, place_of_birth, timezone,
            western_sun_sign, western_moon_sign,
            vedic_rasi, vedic_nakshatra, vedic_lagna
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&profile.firstname)
    .bind(&profile.middlename)
    .bind(&profile.lastname)
    .bind(&profile.gender)
    .bind(&profile.date_of_birth)
    .bind(&profile.time_of_birth)
    .bind(&profile.place_of_birth)
    .bind(&profile.timezone)
    .bind(&profile.western_sun_sign)
    .bind(&profile.western_moon_sign)
    .bind(&profile.vedic_rasi)
    .bind(&profile.vedic_nakshatra)
    .bind(&profile.vedic_lagna)
    .execute(pool)
    .await?
    .last_insert_rowid();

    get_profile(pool, id).await
}

/// Get a profile row by id, deleted or not. Callers that must exclude
/// soft-deleted rows check `is_deleted` (or use the membership-scoped
/// listing, which excludes them).
pub async fn get_profile(pool: &SqlitePool, profile_id: i64) -> Result<Profile> {
    let record = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE profile_id = ?"
    ))
    .bind(profile_id)
    .fetch_optional(pool)
    .await?;

    record.ok_or_else(|| DatabaseError::not_found("profile", profile_id))
}

/// Record that a profile belongs to an account.
pub async fn add_membership(pool: &SqlitePool, account_id: i64, profile_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO account_membership (account_id, profile_id)
        VALUES (?, ?)
        "#,
    )
    .bind(account_id)
    .bind(profile_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Whether a (non-deleted) profile belongs to the account.
pub async fn has_membership(pool: &SqlitePool, account_id: i64, profile_id: i64) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM account_membership m
        JOIN profiles p ON p.profile_id = m.profile_id
        WHERE m.account_id = ? AND m.profile_id = ? AND p.is_deleted = 0
        "#,
    )
    .bind(account_id)
    .bind(profile_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Whether the profile was ever attached to the account, deleted or not.
pub async fn has_any_membership(
    pool: &SqlitePool,
    account_id: i64,
    profile_id: i64,
) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM account_membership
        WHERE account_id = ? AND profile_id = ?
        "#,
    )
    .bind(account_id)
    .bind(profile_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Number of profiles ever attached to the account (soft-deleted included;
/// used for the first-profile-becomes-primary rule).
pub async fn count_memberships(pool: &SqlitePool, account_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM account_membership WHERE account_id = ?
        "#,
    )
    .bind(account_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// List the account's non-deleted profiles, oldest membership first.
pub async fn list_profiles(
    pool: &SqlitePool,
    account_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<Profile>> {
    let columns = PROFILE_COLUMNS.replace(
        |c: char| c.is_whitespace(),
        "",
    );
    let columns = columns
        .split(',')
        .map(|c| format!("p.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    let records = sqlx::query_as::<_, Profile>(&format!(
        r#"
        SELECT {columns}
        FROM profiles p
        JOIN account_membership m ON m.profile_id = p.profile_id
        WHERE m.account_id = ? AND p.is_deleted = 0
        ORDER BY m.created_at, p.profile_id
        LIMIT ? OFFSET ?
        "#
    ))
    .bind(account_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Apply a partial update. Absent fields keep their stored value.
pub async fn update_profile(
    pool: &SqlitePool,
    profile_id: i64,
    changes: &ProfileChanges,
) -> Result<Profile> {
    sqlx::query(
        r#"
        UPDATE profiles SET
            firstname = COALESCE(?, firstname),
            middlename = COALESCE(?, middlename),
            lastname = COALESCE(?, lastname),
            gender = COALESCE(?, gender),
            date_of_birth = COALESCE(?, date_of_birth),
            time_of_birth = COALESCE(?, time_of_birth),
            place_of_birth = COALESCE(?, place_of_birth),
            timezone = COALESCE(?, timezone),
            western_sun_sign = COALESCE(?, western_sun_sign),
            western_moon_sign = COALESCE(?, western_moon_sign),
            vedic_rasi = COALESCE(?, vedic_rasi),
            vedic_nakshatra = COALESCE(?, vedic_nakshatra),
            vedic_lagna = COALESCE(?, vedic_lagna),
            updated_at = datetime('now')
        WHERE profile_id = ?
        "#,
    )
    .bind(changes.firstname.as_deref())
    .bind(changes.middlename.as_deref())
    .bind(changes.lastname.as_deref())
    .bind(changes.gender.as_deref())
    .bind(changes.date_of_birth.as_deref())
    .bind(changes.time_of_birth.as_deref())
    .bind(changes.place_of_birth.as_deref())
    .bind(changes.timezone.as_deref())
    .bind(changes.western_sun_sign.as_deref())
    .bind(changes.western_moon_sign.as_deref())
    .bind(changes.vedic_rasi.as_deref())
    .bind(changes.vedic_nakshatra.as_deref())
    .bind(changes.vedic_lagna.as_deref())
    .bind(profile_id)
    .execute(pool)
    .await?;

    get_profile(pool, profile_id).await
}

/// Mark a profile deleted. The row stays.
pub async fn soft_delete_profile(pool: &SqlitePool, profile_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE profiles
        SET is_deleted = 1, deleted_at = datetime('now'), updated_at = datetime('now')
        WHERE profile_id = ?
        "#,
    )
    .bind(profile_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("profile", profile_id));
    }

    tracing::info!(profile_id, "profile soft-deleted");
    Ok(())
}
