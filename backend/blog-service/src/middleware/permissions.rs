/// Authorization module for blog-service
///
/// Ownership-based permission checks: users can only modify content they
/// authored.
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Post;

/// Check if a user authored a post
pub fn check_post_ownership(user_id: Uuid, post: &Post) -> Result<()> {
    if post.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You don't have permission to modify this post".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_by(author_id: Uuid) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id,
            group_id: None,
            text: "text".into(),
            image_path: None,
            published_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn author_passes_ownership_check() {
        let author = Uuid::new_v4();
        assert!(check_post_ownership(author, &post_by(author)).is_ok());
    }

    #[test]
    fn stranger_fails_ownership_check() {
        let post = post_by(Uuid::new_v4());
        let result = check_post_ownership(Uuid::new_v4(), &post);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
