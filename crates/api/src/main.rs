use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stylisto_api::config::ServerConfig;
use stylisto_api::router::build_app_router;
use stylisto_api::state::AppState;
use stylisto_tryon::{TryOnClient, TryOnConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stylisto_api=debug,stylisto_tryon=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let tryon_config = TryOnConfig::from_env().expect("Invalid try-on configuration");
    tracing::info!(
        api_url = %tryon_config.api_url,
        timeout_ms = tryon_config.timeout.as_millis() as u64,
        mock_fallback = tryon_config.mock_fallback,
        image_hosts = ?tryon_config.allowed_image_hosts,
        "Loaded try-on configuration",
    );

    if config.request_timeout() <= tryon_config.worst_case_duration() {
        tracing::warn!(
            request_timeout_secs = config.request_timeout_secs,
            tryon_worst_case_ms = tryon_config.worst_case_duration().as_millis() as u64,
            "REQUEST_TIMEOUT_SECS is shorter than a worst-case try-on call",
        );
    }
    let tryon = TryOnClient::new(tryon_config).expect("Failed to build try-on HTTP client");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = stylisto_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    stylisto_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        tryon: Arc::new(tryon),
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

/// Wait for SIGINT or (on Unix) SIGTERM.
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
