use actix_cors::Cors;
use actix_middleware::MetricsMiddleware;
use actix_web::{web, App, HttpServer};
use anyhow::{anyhow, Context, Result};
use crypto_core::JwtKeys;
use db_pool::{create_pool as create_pg_pool, DbConfig as DbPoolConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vine_service::db::MIGRATOR;
use vine_service::handlers::health;
use vine_service::{AppState, Config};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_cors(allowed_origins: &str) -> Cors {
    let mut cors = Cors::default();
    for origin in allowed_origins.split(',') {
        let origin = origin.trim();
        if origin.is_empty() {
            continue;
        }
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Vine Service
///
/// REST API for the Vine social network.
///
/// # Routes
///
/// - `/api/users` - registration
/// - `/api/auth` - login, current user
/// - `/api/profile/*` - profiles, experience, education
/// - `/api/posts/*` - posts, likes, comments
/// - `/api/health`, `/api/health/live`, `/metrics` - operations
///
/// Startup failures (configuration, database, migrations, bind) are logged
/// and end the process with a non-zero status.
#[actix_web::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    init_tracing();

    run().await.map_err(|e| {
        tracing::error!("vine-service failed: {:#}", e);
        e
    })
}

async fn run() -> Result<()> {
    let config = Config::from_env().map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting vine-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db_cfg = DbPoolConfig::new(
        "vine-service",
        &config.database.url,
        config.database.max_connections,
    );
    db_cfg.log_config();

    let db_pool = create_pg_pool(db_cfg)
        .await
        .context("Failed to connect to database")?;

    MIGRATOR
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database connected and migrated");

    let keys = Arc::new(JwtKeys::new(
        &config.auth.jwt_secret,
        config.auth.jwt_expiry_secs,
    ));
    let state = AppState::postgres(db_pool.clone(), keys);
    let pool_data = web::Data::new(db_pool);

    let bind_address = config.bind_address();
    let allowed_origins = config.cors.allowed_origins.clone();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .wrap(build_cors(&allowed_origins))
            .wrap(MetricsMiddleware)
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/health", web::get().to(health::health))
            .configure(|cfg| vine_service::configure(cfg, &state))
    })
    .bind(&bind_address)
    .context("Failed to bind HTTP server")?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, stopping HTTP server");
        handle.stop(true).await;
    });

    server
        .await
        .map_err(|e| anyhow!("HTTP server error: {}", e))?;
    tracing::info!("vine-service stopped");
    Ok(())
}
