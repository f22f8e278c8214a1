/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{redirect_to, PaginationParams};
use crate::error::{AppError, Result};
use crate::metrics;
use crate::middleware::CurrentUser;
use crate::models::CommentWithAuthor;
use crate::services::{CommentService, PostService};

/// Form payload for adding a comment
#[derive(Debug, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

/// A comment as served to readers
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentEntry {
    pub id: Uuid,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentEntry {
    fn from(comment: CommentWithAuthor) -> Self {
        Self {
            id: comment.id,
            author: comment.author_username,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

/// Add a comment to a post from a browser form submission
pub async fn add_comment(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<Uuid>,
    user: CurrentUser,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let service = CommentService::new((**pool).clone());
    let comment = service.create_comment(*post_id, user.id, &form.text).await?;

    metrics::COMMENTS_CREATED_TOTAL.inc();
    tracing::debug!(comment_id = %comment.id, "comment form accepted");

    Ok(redirect_to(&format!("/posts/{}", post_id)))
}

/// List a post's comments, newest first
#[utoipa::path(
    get,
    path = "/posts/{post_id}/comments",
    params(("post_id" = Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Comments on the post", body = [CommentEntry]),
        (status = 404, description = "Post does not exist")
    ),
    tag = "posts"
)]
pub async fn list_comments(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    PostService::new((**pool).clone())
        .get_post(*post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} does not exist", post_id)))?;

    let comments: Vec<CommentEntry> = CommentService::new((**pool).clone())
        .get_post_comments(*post_id, query.limit, query.offset)
        .await?
        .into_iter()
        .map(CommentEntry::from)
        .collect();

    Ok(HttpResponse::Ok().json(comments))
}
