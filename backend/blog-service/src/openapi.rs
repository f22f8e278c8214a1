/// OpenAPI documentation for the JSON read surface
///
/// Write endpoints speak the browser form/redirect contract and are not
/// part of the documented JSON API.
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::posts::get_post,
        crate::handlers::comments::list_comments,
        crate::handlers::profiles::get_profile,
        crate::handlers::groups::list_groups,
        crate::handlers::groups::get_group,
    ),
    components(schemas(
        crate::models::Post,
        crate::models::Group,
        crate::models::Comment,
        crate::handlers::posts::PostDetailResponse,
        crate::handlers::comments::CommentEntry,
        crate::handlers::profiles::ProfileResponse,
        crate::handlers::groups::GroupDetailResponse,
    )),
    tags(
        (name = "posts", description = "Post read endpoints"),
        (name = "profiles", description = "Author profile endpoints"),
        (name = "groups", description = "Group endpoints")
    ),
    info(
        title = "Yarrow Blog Service",
        description = "Read API for posts, profiles, and groups"
    )
)]
pub struct ApiDoc;
