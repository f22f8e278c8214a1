/// Comment service - handles comment creation and retrieval
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentWithAuthor};

pub struct CommentService {
    pool: SqlitePool,
}

impl CommentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new comment on a post
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::ValidationError(
                "Comment text must not be empty".to_string(),
            ));
        }

        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} does not exist", post_id)))?;

        let comment = comment_repo::create_comment(&self.pool, post_id, author_id, text).await?;
        tracing::info!(comment_id = %comment.id, post_id = %post_id, "comment created");

        Ok(comment)
    }

    /// Get comments for a post, newest first
    pub async fn get_post_comments(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentWithAuthor>> {
        Ok(comment_repo::get_comments_with_authors(&self.pool, post_id, limit, offset).await?)
    }

    /// Count comments for a post
    pub async fn count_post_comments(&self, post_id: Uuid) -> Result<i64> {
        Ok(comment_repo::count_comments_by_post(&self.pool, post_id).await?)
    }
}
