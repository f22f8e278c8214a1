use crate::models::{AuthenticatedSession, Session};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Create a session with a time-limited token hash
pub async fn create_session(
    pool: &SqlitePool,
    user_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<Session, sqlx::Error> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (id, user_id, token_hash, expires_at, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, token_hash, expires_at, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(token_hash)
    .bind(expires_at)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(session)
}

/// Resolve an unexpired session to its user
pub async fn find_authenticated_session(
    pool: &SqlitePool,
    token_hash: &str,
) -> Result<Option<AuthenticatedSession>, sqlx::Error> {
    let session = sqlx::query_as::<_, AuthenticatedSession>(
        r#"
        SELECT s.id AS session_id, s.user_id, u.username, s.expires_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token_hash = $1 AND s.expires_at > $2
        "#,
    )
    .bind(token_hash)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Revoke a session by its token hash
pub async fn delete_session_by_token_hash(
    pool: &SqlitePool,
    token_hash: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
        .bind(token_hash)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete expired sessions (cleanup)
pub async fn cleanup_expired_sessions(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
        .bind(Utc::now())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
