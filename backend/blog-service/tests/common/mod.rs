//! Shared fixtures for blog-service integration tests.
//!
//! Every test runs against its own temporary directory holding the SQLite
//! database file and the media root; dropping the fixture removes both.

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use chrono::Duration;
use sqlx::SqlitePool;
use tempfile::TempDir;

use blog_service::config::{
    AppConfig, Config, CorsConfig, DatabaseConfig, MediaConfig, SessionConfig,
};
use blog_service::db;
use blog_service::models::{Group, Post, User};
use blog_service::services::{AccountService, GroupService, PostService};
use blog_service::storage::MediaStorage;

/// Password satisfying the registration strength rules.
pub const TEST_PASSWORD: &str = "SecurePass123";

/// 2x1 transparent GIF, the canonical upload fixture.
pub const SMALL_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xFF, 0xFF, 0xFF, 0x21, 0xF9, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00,
    0x00, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x0C, 0x0A, 0x00, 0x3B,
];

pub struct TestApp {
    pub pool: SqlitePool,
    pub config: Config,
    pub storage: MediaStorage,
    _tmp: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let media_root = tmp.path().join("media");
        std::fs::create_dir_all(&media_root).expect("create media root");

        let db_cfg = db_pool::DbConfig {
            service_name: "blog-service-test".into(),
            database_url: format!("sqlite://{}", tmp.path().join("blog.sqlite").display()),
            ..db_pool::DbConfig::default()
        };
        let pool = db_pool::create_pool(db_cfg).await.expect("create pool");
        db::MIGRATOR.run(&pool).await.expect("run migrations");

        let config = Config {
            app: AppConfig {
                env: "test".into(),
                host: "127.0.0.1".into(),
                port: 0,
            },
            cors: CorsConfig {
                allowed_origins: "http://localhost:3000".into(),
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 5,
            },
            media: MediaConfig {
                root: media_root.clone(),
                max_image_bytes: 5 * 1024 * 1024,
            },
            session: SessionConfig {
                ttl_hours: 24,
                cookie_secure: false,
            },
        };

        let storage = MediaStorage::new(&media_root);
        storage.ensure_layout().await.expect("media layout");

        Self {
            pool,
            config,
            storage,
            _tmp: tmp,
        }
    }

    pub async fn create_user(&self, username: &str) -> User {
        AccountService::new(self.pool.clone())
            .register(username, TEST_PASSWORD)
            .await
            .expect("create user")
    }

    /// Issue a session for a user directly, bypassing the login form.
    pub async fn force_login(&self, user: &User) -> String {
        let (token, _session) = AccountService::new(self.pool.clone())
            .issue_session(user.id, Duration::hours(1))
            .await
            .expect("issue session");
        token
    }

    pub async fn create_group(&self, title: &str, slug: &str) -> Group {
        GroupService::new(self.pool.clone())
            .create_group(title, slug, "")
            .await
            .expect("create group")
    }

    pub async fn create_post(&self, author: &User, text: &str) -> Post {
        PostService::new(self.pool.clone())
            .create_post(author.id, text, None, None)
            .await
            .expect("create post")
    }
}

pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::new("session", token.to_string())
}

/// Location header of a redirect response.
pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_string()
}

/// Build a `multipart/form-data` body.
/// Returns the content type (with boundary) and the raw body bytes.
pub fn multipart_form(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &str, &[u8])>,
) -> (String, Vec<u8>) {
    let boundary = "----yarrow-test-boundary";
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((name, filename, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={boundary}"), body)
}
