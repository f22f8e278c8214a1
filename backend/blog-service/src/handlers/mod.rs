/// HTTP request handlers
///
/// Write endpoints speak the browser form contract: successful submissions
/// answer with a `302 Found` to the page that shows the result. Read
/// endpoints serve JSON.
pub mod auth;
pub mod comments;
pub mod groups;
pub mod posts;
pub mod profiles;

use actix_web::{http::header, HttpResponse};
use serde::Deserialize;

pub use auth::{login, logout, signup};
pub use comments::{add_comment, list_comments};
pub use groups::{get_group, list_groups};
pub use posts::{create_post, delete_post, edit_post, get_post};
pub use profiles::get_profile;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PaginationParams {
    /// Page size, capped by the handler defaults
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

/// `302 Found` pointing a browser at the page that shows the result.
pub(crate) fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}
