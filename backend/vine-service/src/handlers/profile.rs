/// Profile handlers
///
/// Listing and reading by user id are public; everything else acts on the
/// caller's own profile.
use super::parse_id;
use crate::error::{AppError, Result};
use crate::models::{EducationRequest, ExperienceRequest, UpsertProfileRequest};
use crate::services::ProfileService;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

/// GET /api/profile/me
pub async fn my_profile(profiles: web::Data<ProfileService>, user_id: UserId) -> Result<HttpResponse> {
    let profile = profiles.my_profile(user_id.0).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /api/profile
pub async fn upsert_profile(
    profiles: web::Data<ProfileService>,
    user_id: UserId,
    req: web::Json<UpsertProfileRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let profile = profiles.upsert(user_id.0, req).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// GET /api/profile
pub async fn list_profiles(profiles: web::Data<ProfileService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(profiles.list_profiles().await?))
}

/// GET /api/profile/user/{user_id}
pub async fn profile_by_user(
    profiles: web::Data<ProfileService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = parse_id(&path, || AppError::BadRequest("Profile not found".to_string()))?;
    let profile = profiles.profile_by_user(user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// DELETE /api/profile - removes profile and account
pub async fn delete_account(
    profiles: web::Data<ProfileService>,
    user_id: UserId,
) -> Result<HttpResponse> {
    profiles.delete_account(user_id.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "msg": "User deleted" })))
}

/// PUT /api/profile/experience
pub async fn add_experience(
    profiles: web::Data<ProfileService>,
    user_id: UserId,
    req: web::Json<ExperienceRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let profile = profiles.add_experience(user_id.0, req).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// DELETE /api/profile/experience/{exp_id}
pub async fn remove_experience(
    profiles: web::Data<ProfileService>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    // An id that cannot match any entry is a no-op, like an unknown one
    let profile = match Uuid::parse_str(&path) {
        Ok(exp_id) => profiles.remove_experience(user_id.0, exp_id).await?,
        Err(_) => profiles.my_profile(user_id.0).await?,
    };
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/profile/education
pub async fn add_education(
    profiles: web::Data<ProfileService>,
    user_id: UserId,
    req: web::Json<EducationRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let profile = profiles.add_education(user_id.0, req).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// DELETE /api/profile/education/{edu_id}
pub async fn remove_education(
    profiles: web::Data<ProfileService>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let profile = match Uuid::parse_str(&path) {
        Ok(edu_id) => profiles.remove_education(user_id.0, edu_id).await?,
        Err(_) => profiles.my_profile(user_id.0).await?,
    };
    Ok(HttpResponse::Ok().json(profile))
}
