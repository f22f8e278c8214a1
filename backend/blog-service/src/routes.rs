//! Route configuration
//!
//! Centralized route setup shared by `main` and the integration tests.
//! Each domain (auth, posts, profiles, groups) manages its own routes;
//! write endpoints are wrapped in `SessionAuthMiddleware` so that
//! unauthenticated submissions redirect to the login view.

use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::handlers;
use crate::middleware::SessionAuthMiddleware;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Operational endpoints
        .route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .route("/api/v1/openapi.json", web::get().to(openapi_handler))
        .route("/health", web::get().to(health_handler))
        .route("/health/live", web::get().to(liveness_handler))
        // Domain routes
        .configure(routes::auth::configure)
        .configure(routes::posts::configure)
        .configure(routes::profiles::configure)
        .configure(routes::groups::configure);
}

/// Database-backed health check
async fn health_handler(pool: web::Data<SqlitePool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("database connection failed: {}", e),
            "service": "blog-service"
        })),
    }
}

async fn liveness_handler() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

/// OpenAPI JSON endpoint
async fn openapi_handler() -> HttpResponse {
    use utoipa::OpenApi;
    HttpResponse::Ok()
        .content_type("application/json")
        .json(crate::openapi::ApiDoc::openapi())
}

// Sub-modules for each domain
mod routes {
    use super::*;

    pub mod auth {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/auth")
                    .route("/signup", web::post().to(handlers::signup))
                    .route("/login", web::post().to(handlers::login))
                    .route("/logout", web::post().to(handlers::logout)),
            );
        }
    }

    pub mod posts {
        use super::*;
        // Write resources are registered before the catch-all `{post_id}`
        // readers so `/posts/create` never matches as a post id.
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/posts")
                    .service(
                        web::resource("/create")
                            .wrap(SessionAuthMiddleware)
                            .route(web::post().to(handlers::create_post)),
                    )
                    .service(
                        web::resource("/{post_id}/edit")
                            .wrap(SessionAuthMiddleware)
                            .route(web::post().to(handlers::edit_post)),
                    )
                    .service(
                        web::resource("/{post_id}/delete")
                            .wrap(SessionAuthMiddleware)
                            .route(web::post().to(handlers::delete_post)),
                    )
                    .service(
                        web::resource("/{post_id}/comment")
                            .wrap(SessionAuthMiddleware)
                            .route(web::post().to(handlers::add_comment)),
                    )
                    .service(
                        web::resource("/{post_id}/comments")
                            .route(web::get().to(handlers::list_comments)),
                    )
                    .service(
                        web::resource("/{post_id}").route(web::get().to(handlers::get_post)),
                    ),
            );
        }
    }

    pub mod profiles {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/profile")
                    .route("/{username}", web::get().to(handlers::get_profile)),
            );
        }
    }

    pub mod groups {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/groups")
                    .route("", web::get().to(handlers::list_groups))
                    .route("/{slug}", web::get().to(handlers::get_group)),
            );
        }
    }
}
