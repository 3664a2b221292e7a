/// Post handlers - posts, likes and comments. All routes require a token.
use super::parse_id;
use crate::error::{AppError, Result};
use crate::models::{CreateCommentRequest, CreatePostRequest};
use crate::services::posts::{COMMENT_NOT_FOUND, POST_NOT_FOUND};
use crate::services::PostService;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

fn parse_post_id(raw: &str) -> Result<Uuid> {
    parse_id(raw, || AppError::NotFound(POST_NOT_FOUND.to_string()))
}

/// POST /api/posts
pub async fn create_post(
    posts: web::Data<PostService>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let post = posts.create_post(user_id.0, &req.text).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts - newest first
pub async fn list_posts(posts: web::Data<PostService>, _user_id: UserId) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(posts.list_posts().await?))
}

/// GET /api/posts/{id}
pub async fn get_post(
    posts: web::Data<PostService>,
    _user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post = posts.get_post(parse_post_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    posts: web::Data<PostService>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    posts.delete_post(user_id.0, parse_post_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "msg": "Post removed" })))
}

/// PUT /api/posts/like/{id}
pub async fn like_post(
    posts: web::Data<PostService>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let likes = posts.like(user_id.0, parse_post_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(likes))
}

/// PUT /api/posts/unlike/{id}
pub async fn unlike_post(
    posts: web::Data<PostService>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let likes = posts.unlike(user_id.0, parse_post_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(likes))
}

/// POST /api/posts/comment/{id}
pub async fn add_comment(
    posts: web::Data<PostService>,
    user_id: UserId,
    path: web::Path<String>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let comments = posts.add_comment(user_id.0, parse_post_id(&path)?, &req.text).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// DELETE /api/posts/comment/{post_id}/{comment_id}
pub async fn delete_comment(
    posts: web::Data<PostService>,
    user_id: UserId,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (raw_post_id, raw_comment_id) = path.into_inner();
    let post_id = parse_post_id(&raw_post_id)?;
    let comment_id = match Uuid::parse_str(raw_comment_id.trim()) {
        Ok(id) => id,
        Err(_) => {
            // A missing post still wins over a malformed comment id
            posts.get_post(post_id).await?;
            return Err(AppError::NotFound(COMMENT_NOT_FOUND.to_string()));
        }
    };

    let comments = posts.delete_comment(user_id.0, post_id, comment_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}
