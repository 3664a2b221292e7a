/// HTTP handlers for the Vine API
///
/// - `users`: registration
/// - `auth`: login and current user
/// - `profile`: profiles, experience and education
/// - `posts`: posts, likes and comments
/// - `health`: root, liveness, readiness and metrics
pub mod auth;
pub mod health;
pub mod posts;
pub mod profile;
pub mod users;

use crate::error::{AppError, Result};
use uuid::Uuid;

/// Parse a path id. Malformed ids are reported as `on_invalid`, never as a server error.
pub(crate) fn parse_id(raw: &str, on_invalid: impl FnOnce() -> AppError) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| on_invalid())
}
