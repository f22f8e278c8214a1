use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use blog_service::routes::configure_routes;
use blog_service::storage::MediaStorage;
use db_pool::{create_pool, DbConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Blog Service
///
/// Serves the Yarrow blog platform: post creation and editing with image
/// upload, comments, groups, profiles, and cookie-session authentication.
/// Write endpoints answer browser form submissions with redirects;
/// unauthenticated writes redirect to the login view with a `next`
/// parameter pointing back at the denied action.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = blog_service::Config::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("configuration loading failed")?;

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let mut db_cfg = DbConfig::from_env("blog-service").unwrap_or_default();
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
        db_cfg.max_connections = config.database.max_connections;
    }
    db_cfg.service_name = "blog-service".to_string();

    db_cfg.log_config();
    let db_pool = create_pool(db_cfg)
        .await
        .context("database pool creation failed")?;

    blog_service::db::MIGRATOR
        .run(&db_pool)
        .await
        .context("database migration failed")?;

    tracing::info!("Connected to database via db-pool crate");

    // Prepare the media root before accepting uploads
    let storage = MediaStorage::new(&config.media.root);
    storage
        .ensure_layout()
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("media root preparation failed")?;

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let pool_data = web::Data::new(db_pool);
    let config_data = web::Data::new(config.clone());
    let storage_data = web::Data::new(storage);
    let max_upload = config.media.max_image_bytes;

    HttpServer::new(move || {
        // Build CORS configuration
        let cors_builder = Cors::default();
        let mut cors = cors_builder;
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(pool_data.clone())
            .app_data(config_data.clone())
            .app_data(storage_data.clone())
            .app_data(
                actix_multipart::form::MultipartFormConfig::default()
                    .total_limit(max_upload + 64 * 1024),
            )
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
    .context("HTTP server terminated")
}
