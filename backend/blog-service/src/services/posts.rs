/// Post service - handles post creation, retrieval, and management
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::{group_repo, post_repo};
use crate::error::{AppError, Result};
use crate::middleware::permissions::check_post_ownership;
use crate::models::Post;

pub struct PostService {
    pool: SqlitePool,
}

impl PostService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new post, resolving an optional group slug
    pub async fn create_post(
        &self,
        author_id: Uuid,
        text: &str,
        group_slug: Option<&str>,
        image_path: Option<&str>,
    ) -> Result<Post> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::ValidationError(
                "Post text must not be empty".to_string(),
            ));
        }

        let group_id = match group_slug {
            Some(slug) => Some(
                group_repo::find_group_by_slug(&self.pool, slug)
                    .await?
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown group '{}'", slug)))?
                    .id,
            ),
            None => None,
        };

        let post = post_repo::create_post(&self.pool, author_id, group_id, text, image_path).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "post created");

        Ok(post)
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(post_repo::find_post_by_id(&self.pool, post_id).await?)
    }

    /// Get posts for an author
    pub async fn get_author_posts(
        &self,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>> {
        Ok(post_repo::find_posts_by_author(&self.pool, author_id, limit, offset).await?)
    }

    /// Get posts in a group
    pub async fn get_group_posts(
        &self,
        group_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>> {
        Ok(post_repo::find_posts_by_group(&self.pool, group_id, limit, offset).await?)
    }

    /// Edit a post's text in place. Only the author may edit.
    pub async fn edit_post(&self, post_id: Uuid, editor_id: Uuid, text: &str) -> Result<Post> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::ValidationError(
                "Post text must not be empty".to_string(),
            ));
        }

        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} does not exist", post_id)))?;

        check_post_ownership(editor_id, &post)?;

        post_repo::update_post_text(&self.pool, post_id, text).await?;

        let updated = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::Internal("Post vanished during edit".to_string()))?;

        Ok(updated)
    }

    /// Soft delete a post. Only the author may delete.
    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} does not exist", post_id)))?;

        check_post_ownership(user_id, &post)?;

        post_repo::soft_delete_post(&self.pool, post_id).await?;
        tracing::info!(post_id = %post_id, "post deleted");

        Ok(())
    }

    /// Count an author's live posts
    pub async fn count_author_posts(&self, author_id: Uuid) -> Result<i64> {
        Ok(post_repo::count_posts_by_author(&self.pool, author_id).await?)
    }

    /// Count live posts in a group
    pub async fn count_group_posts(&self, group_id: Uuid) -> Result<i64> {
        Ok(post_repo::count_posts_by_group(&self.pool, group_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{user_repo, MIGRATOR};
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    async fn memory_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("memory options")
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("connect memory db");
        MIGRATOR.run(&pool).await.expect("run migrations");
        pool
    }

    async fn seed_author(pool: &SqlitePool) -> Uuid {
        user_repo::create_user(pool, "author", "irrelevant-hash")
            .await
            .expect("seed author")
            .id
    }

    #[tokio::test]
    async fn create_rejects_blank_text() {
        let pool = memory_pool().await;
        let author = seed_author(&pool).await;
        let service = PostService::new(pool);

        let err = service.create_post(author, "   ", None, None).await;
        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn edit_changes_text_without_changing_count() {
        let pool = memory_pool().await;
        let author = seed_author(&pool).await;
        let service = PostService::new(pool.clone());

        let post = service
            .create_post(author, "first draft", None, None)
            .await
            .expect("create");
        assert_eq!(post_repo::count_posts(&pool).await.unwrap(), 1);

        let edited = service
            .edit_post(post.id, author, "final text")
            .await
            .expect("edit");
        assert_eq!(edited.id, post.id);
        assert_eq!(edited.text, "final text");
        assert_eq!(post_repo::count_posts(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn edit_by_non_author_is_forbidden() {
        let pool = memory_pool().await;
        let author = seed_author(&pool).await;
        let stranger = user_repo::create_user(&pool, "stranger", "irrelevant-hash")
            .await
            .expect("seed stranger")
            .id;
        let service = PostService::new(pool.clone());

        let post = service
            .create_post(author, "mine", None, None)
            .await
            .expect("create");

        let err = service.edit_post(post.id, stranger, "hijacked").await;
        assert!(matches!(err, Err(AppError::Forbidden(_))));

        let unchanged = service.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(unchanged.text, "mine");
    }

    #[tokio::test]
    async fn deleted_posts_leave_reads_and_counts() {
        let pool = memory_pool().await;
        let author = seed_author(&pool).await;
        let service = PostService::new(pool.clone());

        let post = service
            .create_post(author, "ephemeral", None, None)
            .await
            .expect("create");

        service.delete_post(post.id, author).await.expect("delete");
        assert!(service.get_post(post.id).await.unwrap().is_none());
        assert_eq!(post_repo::count_posts(&pool).await.unwrap(), 0);
    }
}
