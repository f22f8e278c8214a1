use crate::models::Post;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Create a new post
/// Returns the created post
pub async fn create_post(
    pool: &SqlitePool,
    author_id: Uuid,
    group_id: Option<Uuid>,
    text: &str,
    image_path: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let now = Utc::now();

    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, author_id, group_id, text, image_path, published_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, author_id, group_id, text, image_path, published_at, updated_at, deleted_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(author_id)
    .bind(group_id)
    .bind(text)
    .bind(image_path)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID (excluding soft-deleted posts)
pub async fn find_post_by_id(pool: &SqlitePool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_path, published_at, updated_at, deleted_at
        FROM posts
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find all posts by an author (excluding soft-deleted)
/// Returns posts in descending order by publish date
pub async fn find_posts_by_author(
    pool: &SqlitePool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_path, published_at, updated_at, deleted_at
        FROM posts
        WHERE author_id = $1 AND deleted_at IS NULL
        ORDER BY published_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Find all posts in a group (excluding soft-deleted)
pub async fn find_posts_by_group(
    pool: &SqlitePool,
    group_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_path, published_at, updated_at, deleted_at
        FROM posts
        WHERE group_id = $1 AND deleted_at IS NULL
        ORDER BY published_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(group_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Update post text in place
pub async fn update_post_text(
    pool: &SqlitePool,
    post_id: Uuid,
    text: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET text = $1, updated_at = $2
        WHERE id = $3 AND deleted_at IS NULL
        "#,
    )
    .bind(text)
    .bind(Utc::now())
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Soft delete a post
pub async fn soft_delete_post(pool: &SqlitePool, post_id: Uuid) -> Result<u64, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET deleted_at = $1, updated_at = $2
        WHERE id = $3 AND deleted_at IS NULL
        "#,
    )
    .bind(now)
    .bind(now)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Count all live posts
pub async fn count_posts(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM posts WHERE deleted_at IS NULL")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Count live posts for an author
pub async fn count_posts_by_author(
    pool: &SqlitePool,
    author_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) as count FROM posts WHERE author_id = $1 AND deleted_at IS NULL",
    )
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Count live posts in a group
pub async fn count_posts_by_group(pool: &SqlitePool, group_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) as count FROM posts WHERE group_id = $1 AND deleted_at IS NULL",
    )
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}
