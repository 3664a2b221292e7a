/// Root, health and metrics endpoints
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// GET /
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("API Running")
}

/// GET /api/health/live
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "alive": true }))
}

/// GET /api/health - checks the database
pub async fn health(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "vine-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "vine-service"
            }))
        }
    }
}

/// GET /metrics - Prometheus text format
pub async fn metrics() -> HttpResponse {
    match actix_middleware::render_metrics() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(body),
        Err(e) => {
            tracing::error!("failed to render metrics: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
