/// Group handlers - slugged post categories
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use super::PaginationParams;
use crate::error::{AppError, Result};
use crate::models::{Group, Post};
use crate::services::{GroupService, PostService};

/// A group with its posts
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupDetailResponse {
    pub group: Group,
    pub post_count: i64,
    pub posts: Vec<Post>,
}

/// List all groups
#[utoipa::path(
    get,
    path = "/groups",
    responses((status = 200, description = "All groups", body = [Group])),
    tag = "groups"
)]
pub async fn list_groups(
    pool: web::Data<SqlitePool>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let groups = GroupService::new((**pool).clone())
        .list_groups(query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(groups))
}

/// Get a group and its posts, newest first
#[utoipa::path(
    get,
    path = "/groups/{slug}",
    params(("slug" = String, Path, description = "Group slug")),
    responses(
        (status = 200, description = "Group detail with posts", body = GroupDetailResponse),
        (status = 404, description = "Group does not exist")
    ),
    tag = "groups"
)]
pub async fn get_group(
    pool: web::Data<SqlitePool>,
    slug: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let group = GroupService::new((**pool).clone())
        .get_group(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group '{}' does not exist", slug)))?;

    let posts_service = PostService::new((**pool).clone());
    let post_count = posts_service.count_group_posts(group.id).await?;
    let posts = posts_service
        .get_group_posts(group.id, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(GroupDetailResponse {
        group,
        post_count,
        posts,
    }))
}
