//! # Actix Middleware Library
//!
//! Unified middleware components for Vine Actix services
//!
//! ## Modules
//! - `jwt_auth`: `x-auth-token` authentication guard
//! - `metrics`: Prometheus metrics middleware

pub mod jwt_auth;
pub mod metrics;

pub use jwt_auth::{AuthError, JwtAuthMiddleware, UserId, AUTH_HEADER};
pub use metrics::{render_metrics, MetricsMiddleware};
