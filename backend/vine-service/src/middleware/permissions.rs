/// Ownership checks for posts and comments
///
/// Only the author of a post or comment may delete it. A failed check is
/// reported as `AppError::Forbidden`, rendered as 401 "User not authorized".
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Comment, Post};

/// Result type for permission checks
pub type PermissionResult = Result<(), AppError>;

fn check_owner(user_id: Uuid, owner_id: Uuid) -> PermissionResult {
    if owner_id == user_id {
        Ok(())
    } else {
        Err(AppError::forbidden())
    }
}

/// Check if a user wrote a post
pub fn check_post_ownership(user_id: Uuid, post: &Post) -> PermissionResult {
    check_owner(user_id, post.user)
}

/// Check if a user wrote a comment
pub fn check_comment_ownership(user_id: Uuid, comment: &Comment) -> PermissionResult {
    check_owner(user_id, comment.user)
}
