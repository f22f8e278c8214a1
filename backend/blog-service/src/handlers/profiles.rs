/// Profile handlers - an author's public page
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;
use uuid::Uuid;

use super::PaginationParams;
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::services::PostService;

/// An author's profile with their posts
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub post_count: i64,
    pub posts: Vec<Post>,
}

/// Get a user's profile and their posts, newest first
#[utoipa::path(
    get,
    path = "/profile/{username}",
    params(("username" = String, Path, description = "Author username")),
    responses(
        (status = 200, description = "Author profile with posts", body = ProfileResponse),
        (status = 404, description = "User does not exist")
    ),
    tag = "profiles"
)]
pub async fn get_profile(
    pool: web::Data<SqlitePool>,
    username: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let user = user_repo::find_user_by_username(&pool, &username)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' does not exist", username)))?;

    let service = PostService::new((**pool).clone());
    let post_count = service.count_author_posts(user.id).await?;
    let posts = service
        .get_author_posts(user.id, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        id: user.id,
        username: user.username,
        post_count,
        posts,
    }))
}
