/// Account service - registration, login, and session lifecycle
use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::{session_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Session, User};
use crate::security;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("valid username regex"));

pub struct AccountService {
    pool: SqlitePool,
}

impl AccountService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new user with a hashed password
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        if !USERNAME_RE.is_match(username) {
            return Err(AppError::ValidationError(
                "Username must be 3-30 characters of letters, digits, or underscores".to_string(),
            ));
        }

        let password_hash = security::hash_password(password)?;

        match user_repo::create_user(&self.pool, username, &password_hash).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, %username, "user registered");
                Ok(user)
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                format!("Username '{}' is already taken", username),
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Verify credentials and issue a fresh session.
    /// Returns the opaque cookie token together with the user.
    pub async fn login(&self, username: &str, password: &str, ttl: Duration) -> Result<(String, User)> {
        let user = user_repo::find_user_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

        security::verify_password(password, &user.password_hash)?;

        // Opportunistic cleanup; stale rows only cost space, never access.
        if let Err(err) = session_repo::cleanup_expired_sessions(&self.pool).await {
            tracing::debug!("expired session cleanup failed: {}", err);
        }

        let (token, _session) = self.issue_session(user.id, ttl).await?;
        Ok((token, user))
    }

    /// Create a session row for a user and return the cookie token
    pub async fn issue_session(&self, user_id: Uuid, ttl: Duration) -> Result<(String, Session)> {
        let token = security::generate_session_token();
        let session = session_repo::create_session(
            &self.pool,
            user_id,
            &security::hash_session_token(&token),
            Utc::now() + ttl,
        )
        .await?;

        Ok((token, session))
    }

    /// Revoke the session behind a cookie token, if any
    pub async fn logout(&self, token: &str) -> Result<bool> {
        let removed =
            session_repo::delete_session_by_token_hash(&self.pool, &security::hash_session_token(token))
                .await?;

        Ok(removed > 0)
    }
}
