use crate::models::Group;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Create a new group
pub async fn create_group(
    pool: &SqlitePool,
    title: &str,
    slug: &str,
    description: &str,
) -> Result<Group, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (id, title, slug, description, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, title, slug, description, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(slug)
    .bind(description)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(group)
}

/// Find a group by its slug
pub async fn find_group_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<Group>, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description, created_at
        FROM groups
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

/// Find a group by ID
pub async fn find_group_by_id(
    pool: &SqlitePool,
    group_id: Uuid,
) -> Result<Option<Group>, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description, created_at
        FROM groups
        WHERE id = $1
        "#,
    )
    .bind(group_id)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

/// List groups ordered by title
pub async fn list_groups(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Group>, sqlx::Error> {
    let groups = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description, created_at
        FROM groups
        ORDER BY title
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(groups)
}
