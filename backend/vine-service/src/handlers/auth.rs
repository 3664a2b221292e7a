/// Login and current-user endpoints
use crate::error::Result;
use crate::models::{LoginRequest, TokenResponse};
use crate::services::UserService;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use validator::Validate;

/// GET /api/auth - the caller's account without the password hash
pub async fn current_user(users: web::Data<UserService>, user_id: UserId) -> Result<HttpResponse> {
    let user = users.current_user(user_id.0).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// POST /api/auth
pub async fn login(
    users: web::Data<UserService>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let token = users.login(req).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
