//! Chat message storage.

use sqlx::SqlitePool;

use crate::models::ChatMessage;
use crate::{DatabaseError, Result};

const MESSAGE_COLUMNS: &str = r#"
    message_id, account_id, profile_id, sender_type, content,
    astrology_system, is_deleted, deleted_at, created_at
"#;

/// Insert one message and return the stored row.
pub async fn insert_message(
    pool: &SqlitePool,
    account_id: i64,
    profile_id: Option<i64>,
    sender_type: &str,
    content: &str,
    astrology_system: &str,
) -> Result<ChatMessage> {
    let id = sqlx::query(
        r#"
        INSERT INTO chat_messages (account_id, profile_id, sender_type, content, astrology_system)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(account_id)
    .bind(profile_id)
    .bind(sender_type)
    .bind(content)
    .bind(astrology_system)
    .execute(pool)
    .await?
    .last_insert_rowid();

    get_message(pool, id).await
}

/// Get a message row by id, deleted or not.
pub async fn get_message(pool: &SqlitePool, message_id: i64) -> Result<ChatMessage> {
    let record = sqlx::query_as::<_, ChatMessage>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM chat_messages WHERE message_id = ?"
    ))
    .bind(message_id)
    .fetch_optional(pool)
    .await?;

    record.ok_or_else(|| DatabaseError::not_found("message", message_id))
}

/// The most recent non-deleted messages for the (account, profile) pair, in
/// ascending chronological order. A `None` profile selects the undirected
/// conversation bucket, not all conversations.
pub async fn recent_messages(
    pool: &SqlitePool,
    account_id: i64,
    profile_id: Option<i64>,
    limit: i64,
) -> Result<Vec<ChatMessage>> {
    // Inner query takes the newest N; the outer flips them back to ascending.
    let records = sqlx::query_as::<_, ChatMessage>(&format!(
        r#"
        SELECT {MESSAGE_COLUMNS} FROM (
            SELECT {MESSAGE_COLUMNS}
            FROM chat_messages
            WHERE account_id = ? AND profile_id IS ? AND is_deleted = 0
            ORDER BY created_at DESC, message_id DESC
            LIMIT ?
        )
        ORDER BY created_at, message_id
        "#
    ))
    .bind(account_id)
    .bind(profile_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Paged history for the (account, profile) pair, ascending, deleted rows
/// excluded.
pub async fn list_history(
    pool: &SqlitePool,
    account_id: i64,
    profile_id: Option<i64>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ChatMessage>> {
    let records = sqlx::query_as::<_, ChatMessage>(&format!(
        r#"
        SELECT {MESSAGE_COLUMNS}
        FROM chat_messages
        WHERE account_id = ? AND profile_id IS ? AND is_deleted = 0
        ORDER BY created_at, message_id
        LIMIT ? OFFSET ?
        "#
    ))
    .bind(account_id)
    .bind(profile_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Total non-deleted messages in the (account, profile) bucket.
pub async fn count_history(
    pool: &SqlitePool,
    account_id: i64,
    profile_id: Option<i64>,
) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM chat_messages
        WHERE account_id = ? AND profile_id IS ? AND is_deleted = 0
        "#,
    )
    .bind(account_id)
    .bind(profile_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Replace a message's content.
pub async fn update_content(
    pool: &SqlitePool,
    message_id: i64,
    content: &str,
) -> Result<ChatMessage> {
    let result = sqlx::query(
        r#"
        UPDATE chat_messages SET content = ? WHERE message_id = ?
        "#,
    )
    .bind(content)
    .bind(message_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("message", message_id));
    }
    get_message(pool, message_id).await
}

/// Mark a message deleted. The row stays.
pub async fn soft_delete_message(pool: &SqlitePool, message_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE chat_messages
        SET is_deleted = 1, deleted_at = datetime('now')
        WHERE message_id = ?
        "#,
    )
    .bind(message_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::not_found("message", message_id));
    }

    tracing::info!(message_id, "message soft-deleted");
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
    async fn test_insert_and_order() {
        let (db, account_id) = test_db().await;

        let user = insert_message(db.pool(), account_id, None, "USER", "hi", "VEDIC")
            .await
            .unwrap();
        let bot = insert_message(db.pool(), account_id, None, "BOT", "namaste", "VEDIC")
            .await
            .unwrap();

        // Same-second inserts still come back in creation order.
        let history = recent_messages(db.pool(), account_id, None, 10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].message_id, user.message_id);
        assert_eq!(history[1].message_id, bot.message_id);
        assert_eq!(history[0].sender_type, "USER");
        assert_eq!(history[1].sender_type, "BOT");
    }

    #[tokio::test]
    async fn test_recent_messages_window() {
        let (db, account_id) = test_db().await;

        for i in 0..15 {
            insert_message(
                db.pool(),
                account_id,
                None,
                "USER",
                &format!("message {i}"),
                "VEDIC",
            )
            .await
            .unwrap();
        }

        let window = recent_messages(db.pool(), account_id, None, 10).await.unwrap();
        assert_eq!(window.len(), 10);
        // Newest 10, oldest of them first.
        assert_eq!(window[0].content, "message 5");
        assert_eq!(window[9].content, "message 14");
    }

    #[tokio::test]
    async fn test_profile_buckets_are_separate() {
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

        insert_message(db.pool(), account_id, None, "USER", "undirected", "VEDIC")
            .await
            .unwrap();
        insert_message(
            db.pool(),
            account_id,
            Some(profile.profile_id),
            "USER",
            "directed",
            "VEDIC",
        )
        .await
        .unwrap();

        let undirected = recent_messages(db.pool(), account_id, None, 10).await.unwrap();
        assert_eq!(undirected.len(), 1);
        assert_eq!(undirected[0].content, "undirected");

        let directed = recent_messages(db.pool(), account_id, Some(profile.profile_id), 10)
            .await
            .unwrap();
        assert_eq!(directed.len(), 1);
        assert_eq!(directed[0].content, "directed");
    }

    #[tokio::test]
    async fn test_soft_delete_excluded_from_history() {
        let (db, account_id) = test_db().await;

        let msg = insert_message(db.pool(), account_id, None, "USER", "oops", "VEDIC")
            .await
            .unwrap();
        soft_delete_message(db.pool(), msg.message_id).await.unwrap();

        assert_eq!(count_history(db.pool(), account_id, None).await.unwrap(), 0);
        assert!(recent_messages(db.pool(), account_id, None, 10)
            .await
            .unwrap()
            .is_empty());

        // Row remains, flagged.
        let row = get_message(db.pool(), msg.message_id).await.unwrap();
        assert!(row.is_deleted);
        assert!(row.deleted_at.is_some());
    }

    #[tokio::test]
    async fn test_update_content() {
        let (db, account_id) = test_db().await;

        let msg = insert_message(db.pool(), account_id, None, "USER", "old", "WESTERN")
            .await
            .unwrap();
        let updated = update_content(db.pool(), msg.message_id, "new").await.unwrap();
        assert_eq!(updated.content, "new");
        assert_eq!(updated.astrology_system, "WESTERN");
    }
}
