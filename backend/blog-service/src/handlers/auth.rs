/// Auth handlers - signup, login, and logout
///
/// Login issues an opaque session token, sets it as an HttpOnly cookie,
/// and honors the `next` query parameter the redirect-to-login contract
/// put there, so a denied action resumes after authentication.
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use chrono::Duration;
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use super::redirect_to;
use crate::config::Config;
use crate::error::Result;
use crate::metrics;
use crate::middleware::SESSION_COOKIE;
use crate::services::AccountService;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Register a new account, then send the browser to the login view
pub async fn signup(pool: web::Data<SqlitePool>, form: web::Form<SignupForm>) -> Result<HttpResponse> {
    form.validate()?;

    AccountService::new((**pool).clone())
        .register(&form.username, &form.password)
        .await?;

    Ok(redirect_to("/auth/login"))
}

/// Verify credentials, set the session cookie, and follow `next`
pub async fn login(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let service = AccountService::new((**pool).clone());
    let ttl = Duration::hours(config.session.ttl_hours);

    let (token, user) = match service.login(&form.username, &form.password, ttl).await {
        Ok(issued) => {
            metrics::LOGIN_ATTEMPTS_TOTAL
                .with_label_values(&["success"])
                .inc();
            issued
        }
        Err(err) => {
            metrics::LOGIN_ATTEMPTS_TOTAL
                .with_label_values(&["failure"])
                .inc();
            return Err(err);
        }
    };

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.session.cookie_secure)
        .finish();

    // Only local paths are followed; anything else falls back to the
    // author's profile (open redirect guard).
    let target = query
        .into_inner()
        .next
        .filter(|next| next.starts_with('/') && !next.starts_with("//"))
        .unwrap_or_else(|| format!("/profile/{}", user.username));

    Ok(HttpResponse::Found()
        .cookie(cookie)
        .insert_header((header::LOCATION, target))
        .finish())
}

/// Revoke the current session and clear the cookie
pub async fn logout(req: HttpRequest, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        AccountService::new((**pool).clone())
            .logout(cookie.value())
            .await?;
    }

    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();

    Ok(HttpResponse::Found()
        .cookie(removal)
        .insert_header((header::LOCATION, "/"))
        .finish())
}
