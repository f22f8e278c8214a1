/// Business logic layer
pub mod accounts;
pub mod comments;
pub mod groups;
pub mod posts;

pub use accounts::AccountService;
pub use comments::CommentService;
pub use groups::GroupService;
pub use posts::PostService;
