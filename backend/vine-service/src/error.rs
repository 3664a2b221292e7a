/// Error types for Vine Service
///
/// Every failure a handler can produce is an `AppError`. Client-facing
/// variants render the JSON bodies the web client expects; storage and
/// internal failures are logged in full and rendered as a generic
/// `{ "msg": "Server Error" }`. Missing or invalid tokens never reach a
/// handler; `actix_middleware::AuthError` answers those with 401.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use crypto_core::{PasswordError, TokenError};
use serde::Serialize;
use validator::ValidationErrors;

/// Result type for vine-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Single input problem, rendered inside `{ "errors": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(param: &str, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.to_string()),
        }
    }

    /// Error not tied to a particular input field
    pub fn general(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request input failed validation (400, `{ errors: [...] }`)
    #[error("validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    /// Malformed request or missing prerequisite (400, `{ msg }`)
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Operation conflicts with current state (400, `{ msg }`)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Authenticated but not the owner (401, matching the web client's contract)
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-entry validation error, used for credential and uniqueness failures
    pub fn validation_msg(msg: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::general(msg)])
    }

    pub fn forbidden() -> Self {
        AppError::Forbidden("User not authorized".to_string())
    }

    fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(_) | AppError::Database(_) | AppError::Internal(_) => {
                "Server Error".to_string()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Forbidden(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            AppError::Validation(errors) => {
                HttpResponse::build(status).json(serde_json::json!({ "errors": errors }))
            }
            AppError::Database(detail) | AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed with server error");
                HttpResponse::build(status).json(serde_json::json!({ "msg": self.client_message() }))
            }
            _ => HttpResponse::build(status).json(serde_json::json!({ "msg": self.client_message() })),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("blocking task failed: {}", err))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(&field, msg)
                })
            })
            .collect();

        // field_errors() is a map; keep the rendering stable
        fields.sort_by(|a, b| a.param.cmp(&b.param));
        fields.dedup();
        AppError::Validation(fields)
    }
}

/// Body extractor configuration: malformed JSON becomes a 400 validation error
pub fn json_config() -> actix_web::web::JsonConfig {
    actix_web::web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| {
            tracing::debug!("rejected request body: {}", err);
            AppError::Validation(vec![FieldError::general(err.to_string())]).into()
        })
}
