// Report server entry point
//
// Serves the monthly report form, the JSON API and .docx downloads.
// Usage: cargo run --bin report_server

use irrigation_report::{create_router, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default log level: info for our crate, warn for others
                "irrigation_report=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting report server...");

    let config = ServerConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  BIND_ADDR: {}", config.bind_addr);
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  SESSION_TTL_SECS: {}", config.session_ttl.as_secs());
    tracing::info!("  SESSION_CAPACITY: {}", config.session_capacity);
    tracing::info!("  MAX_UPLOAD_BYTES: {}", config.max_upload_bytes);

    let addr = config.socket_addr();
    let state = AppState::new(config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
