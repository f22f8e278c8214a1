/// Post handlers - HTTP endpoints for post operations
use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{redirect_to, PaginationParams};
use crate::db::{group_repo, user_repo};
use crate::error::{AppError, Result};
use crate::handlers::comments::CommentEntry;
use crate::metrics;
use crate::middleware::CurrentUser;
use crate::models::Post;
use crate::services::{CommentService, PostService};
use crate::storage::MediaStorage;

/// Multipart payload for creating a post
#[derive(Debug, MultipartForm)]
pub struct CreatePostForm {
    pub text: Text<String>,
    pub group: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

/// Form payload for editing a post's text
#[derive(Debug, serde::Deserialize, Validate)]
pub struct EditPostForm {
    #[validate(length(min = 1, max = 10000))]
    pub text: String,
}

/// Post detail as served to readers
#[derive(Debug, Serialize, ToSchema)]
pub struct PostDetailResponse {
    pub post: Post,
    pub author: String,
    pub group: Option<String>,
    pub comment_count: i64,
    pub comments: Vec<CommentEntry>,
}

/// Create a new post from a browser form submission
pub async fn create_post(
    pool: web::Data<SqlitePool>,
    storage: web::Data<MediaStorage>,
    user: CurrentUser,
    form: MultipartForm<CreatePostForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();

    // Reject blank text before touching the media root so a bad submission
    // never leaves an orphaned file behind.
    if form.text.0.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Post text must not be empty".to_string(),
        ));
    }

    let image_path = match &form.image {
        Some(upload) => Some(storage.save_post_image(upload).await?),
        None => None,
    };

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(
            user.id,
            &form.text.0,
            form.group.as_ref().map(|group| group.0.as_str()),
            image_path.as_deref(),
        )
        .await?;

    metrics::POSTS_CREATED_TOTAL.inc();
    tracing::debug!(post_id = %post.id, "post form accepted");

    Ok(redirect_to(&format!("/profile/{}", user.username)))
}

/// Edit a post's text in place (author only)
pub async fn edit_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<Uuid>,
    user: CurrentUser,
    form: web::Form<EditPostForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service.edit_post(*post_id, user.id, &form.text).await?;

    Ok(redirect_to(&format!("/posts/{}", post.id)))
}

/// Soft delete a post (author only)
pub async fn delete_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_post(*post_id, user.id).await?;

    Ok(redirect_to(&format!("/profile/{}", user.username)))
}

/// Get a post with its author, group, and comments
#[utoipa::path(
    get,
    path = "/posts/{post_id}",
    params(("post_id" = Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post detail with comments", body = PostDetailResponse),
        (status = 404, description = "Post does not exist")
    ),
    tag = "posts"
)]
pub async fn get_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .get_post(*post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} does not exist", post_id)))?;

    let author = user_repo::find_user_by_id(&pool, post.author_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::Internal("Post author missing".to_string()))?;

    let group = match post.group_id {
        Some(group_id) => group_repo::find_group_by_id(&pool, group_id)
            .await
            .map_err(AppError::from)?
            .map(|group| group.slug),
        None => None,
    };

    let comment_service = CommentService::new((**pool).clone());
    let comment_count = comment_service.count_post_comments(post.id).await?;
    let comments = comment_service
        .get_post_comments(post.id, query.limit, query.offset)
        .await?
        .into_iter()
        .map(CommentEntry::from)
        .collect();

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post,
        author: author.username,
        group,
        comment_count,
        comments,
    }))
}
