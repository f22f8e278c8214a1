/// Group service - slugged post categories
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::SqlitePool;

use crate::db::group_repo;
use crate::error::{AppError, Result};
use crate::models::Group;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]{0,62}$").expect("valid slug regex"));

pub struct GroupService {
    pool: SqlitePool,
}

impl GroupService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new group
    pub async fn create_group(&self, title: &str, slug: &str, description: &str) -> Result<Group> {
        if title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Group title must not be empty".to_string(),
            ));
        }
        if !SLUG_RE.is_match(slug) {
            return Err(AppError::ValidationError(
                "Group slug must be lowercase letters, digits, '-' or '_'".to_string(),
            ));
        }

        match group_repo::create_group(&self.pool, title.trim(), slug, description).await {
            Ok(group) => Ok(group),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                format!("Group slug '{}' is already taken", slug),
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Find a group by slug
    pub async fn get_group(&self, slug: &str) -> Result<Option<Group>> {
        Ok(group_repo::find_group_by_slug(&self.pool, slug).await?)
    }

    /// List groups
    pub async fn list_groups(&self, limit: i64, offset: i64) -> Result<Vec<Group>> {
        Ok(group_repo::list_groups(&self.pool, limit, offset).await?)
    }
}
