/// Vine Service Library
///
/// REST backend for the Vine social network: accounts, profiles with
/// experience and education, and posts with likes and comments.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: request payloads and response documents
/// - `services`: business rules (validation, ownership)
/// - `db`: repository traits and PostgreSQL implementations
/// - `middleware`: ownership checks
/// - `routes`: route table and application state
/// - `error`: error types and HTTP rendering
/// - `config`: configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use routes::{configure, AppState};
