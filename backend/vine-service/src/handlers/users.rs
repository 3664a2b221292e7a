/// Account registration endpoints
use crate::error::Result;
use crate::models::{RegisterRequest, TokenResponse};
use crate::services::UserService;
use actix_web::{web, HttpResponse};
use validator::Validate;

/// GET /api/users
pub async fn users_placeholder() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("User route")
}

/// POST /api/users
pub async fn register(
    users: web::Data<UserService>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let token = users.register(req).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
