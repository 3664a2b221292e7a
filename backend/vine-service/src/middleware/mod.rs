/// Request-level authorization helpers
///
/// Authentication itself lives in `actix_middleware::JwtAuthMiddleware`;
/// this module decides what an authenticated user may change.
pub mod permissions;

pub use permissions::{check_comment_ownership, check_post_ownership, PermissionResult};
