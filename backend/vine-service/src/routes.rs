/// Route table and shared application state
///
/// `configure` is used by the binary and by the HTTP tests, so both see the
/// same routes, guards and extractor configuration.
use crate::db::{
    PgPostRepository, PgProfileRepository, PgUserRepository, PostRepository, ProfileRepository,
    UserRepository,
};
use crate::error::json_config;
use crate::handlers::{auth, health, posts, profile, users};
use crate::services::{PostService, ProfileService, UserService};
use actix_middleware::JwtAuthMiddleware;
use actix_web::{guard, web};
use crypto_core::JwtKeys;
use sqlx::PgPool;
use std::sync::Arc;

/// Services shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub profiles: ProfileService,
    pub posts: PostService,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        post_repo: Arc<dyn PostRepository>,
        keys: Arc<JwtKeys>,
    ) -> Self {
        let users = UserService::new(user_repo, keys.clone());
        Self {
            profiles: ProfileService::new(profile_repo),
            posts: PostService::new(post_repo, users.clone()),
            users,
            keys,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, keys: Arc<JwtKeys>) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgProfileRepository::new(pool.clone())),
            Arc::new(PgPostRepository::new(pool)),
            keys,
        )
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    let auth_guard = JwtAuthMiddleware::new(state.keys.clone());

    cfg.app_data(json_config())
        .app_data(web::Data::new(state.users.clone()))
        .app_data(web::Data::new(state.profiles.clone()))
        .app_data(web::Data::new(state.posts.clone()))
        .route("/", web::get().to(health::root))
        .route("/metrics", web::get().to(health::metrics))
        .route("/api/health/live", web::get().to(health::liveness))
        .service(
            web::resource("/api/users")
                .route(web::get().to(users::users_placeholder))
                .route(web::post().to(users::register)),
        )
        .service(
            web::scope("/api/auth")
                .service(
                    web::resource("")
                        .guard(guard::Get())
                        .wrap(auth_guard.clone())
                        .route(web::get().to(auth::current_user)),
                )
                .service(web::resource("").route(web::post().to(auth::login))),
        )
        .service(
            web::scope("/api/profile")
                .service(
                    web::resource("")
                        .guard(guard::Get())
                        .route(web::get().to(profile::list_profiles)),
                )
                .service(
                    web::resource("")
                        .wrap(auth_guard.clone())
                        .route(web::post().to(profile::upsert_profile))
                        .route(web::delete().to(profile::delete_account)),
                )
                .service(
                    web::resource("/me")
                        .wrap(auth_guard.clone())
                        .route(web::get().to(profile::my_profile)),
                )
                .service(
                    web::resource("/user/{user_id}").route(web::get().to(profile::profile_by_user)),
                )
                .service(
                    web::resource("/experience")
                        .wrap(auth_guard.clone())
                        .route(web::put().to(profile::add_experience)),
                )
                .service(
                    web::resource("/experience/{exp_id}")
                        .wrap(auth_guard.clone())
                        .route(web::delete().to(profile::remove_experience)),
                )
                .service(
                    web::resource("/education")
                        .wrap(auth_guard.clone())
                        .route(web::put().to(profile::add_education)),
                )
                .service(
                    web::resource("/education/{edu_id}")
                        .wrap(auth_guard.clone())
                        .route(web::delete().to(profile::remove_education)),
                ),
        )
        .service(
            web::scope("/api/posts")
                .wrap(auth_guard)
                .service(
                    web::resource("")
                        .route(web::post().to(posts::create_post))
                        .route(web::get().to(posts::list_posts)),
                )
                .service(web::resource("/like/{id}").route(web::put().to(posts::like_post)))
                .service(web::resource("/unlike/{id}").route(web::put().to(posts::unlike_post)))
                .service(
                    web::resource("/comment/{id}").route(web::post().to(posts::add_comment)),
                )
                .service(
                    web::resource("/comment/{post_id}/{comment_id}")
                        .route(web::delete().to(posts::delete_comment)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(posts::get_post))
                        .route(web::delete().to(posts::delete_post)),
                ),
        );
}
