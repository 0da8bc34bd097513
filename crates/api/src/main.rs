use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use letterpress_api::config::{parse_env, LogFormat, ServerConfig};
use letterpress_api::layout::{FileLayoutProvider, LayoutProvider};
use letterpress_api::router::build_app_router;
use letterpress_api::services::TemplateService;
use letterpress_api::state::AppState;
use letterpress_api::uploads::UploadStorage;
use letterpress_core::render::check_layout;
use letterpress_db::repositories::{TemplateRepo, UserRepo};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "letterpress_api=debug,tower_http=debug".into());
    if LogFormat::from_env() == LogFormat::Json {
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

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections = parse_env("DB_MAX_CONNECTIONS", 20);

    let pool = letterpress_db::create_pool(&database_url, max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    letterpress_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    letterpress_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Layout ---
    let layouts = FileLayoutProvider::new(&config.layout_path);
    let layout = layouts
        .get_layout()
        .await
        .unwrap_or_else(|e| panic!("Email layout is not readable: {e}"));
    check_layout(&layout).unwrap_or_else(|e| panic!("Email layout is invalid: {e}"));
    tracing::info!(path = %config.layout_path.display(), "Email layout loaded");

    // --- App state ---
    let templates = TemplateService::new(
        Arc::new(TemplateRepo::new(pool.clone())),
        Arc::new(layouts),
    );
    let state = AppState {
        config: Arc::new(config.clone()),
        users: Arc::new(UserRepo::new(pool)),
        templates: Arc::new(templates),
        uploads: Arc::new(UploadStorage::new(
            &config.upload_dir,
            config.public_base_url.clone(),
        )),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
