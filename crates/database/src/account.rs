//! Account storage.

use sqlx::SqlitePool;

use crate::models::Account;
use crate::{DatabaseError, Result};

/// Get the account for an auth subject.
pub async fn get_account(pool: &SqlitePool, user_id: &str) -> Result<Account> {
    let record = sqlx::query_as::<_, Account>(
        r#"
        SELECT account_id, user_id, email, created_at
        FROM accounts
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    record.ok_or(DatabaseError::NotFound {
        entity: "account",
        id: user_id.to_string(),
    })
}

/// Get the account for an auth subject, creating it (with default settings)
/// on first touch.
pub async fn get_or_create_account(
    pool: &SqlitePool,
    user_id: &str,
    email: Option<&str>,
) -> Result<Account> {
    if let Ok(existing) = get_account(pool, user_id).await {
        return Ok(existing);
    }

    sqlx::query(
        r#"
        INSERT INTO accounts (user_id, email)
        VALUES (?, ?)
        ON CONFLICT(user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(email)
    .execute(pool)
    .await?;

    let account = get_account(pool, user_id).await?;

    // Settings row rides along with the account; defaults come from the schema.
    sqlx::query(
        r#"
        INSERT INTO account_settings (account_id)
        VALUES (?)
        ON CONFLICT(account_id) DO NOTHING
        "#,
    )
    .bind(account.account_id)
    .execute(pool)
    .await?;

    tracing::info!(account_id = account.account_id, "account created");
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let db = test_db().await;
        let result = get_account(db.pool(), "missing-subject").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_stores_email() {
        let db = test_db().await;
        let acct = get_or_create_account(db.pool(), "subject-1", Some("who@example.com"))
            .await
            .unwrap();
        assert_eq!(acct.email, Some("who@example.com".to_string()));
    }
}
