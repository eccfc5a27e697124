//! Agent Relay Backend
//!
//! A backend-for-frontend that relays chat requests from the UI to a remote
//! conversational agent and streams the agent's events back.

use agent_relay_backend::config::Config;
use agent_relay_backend::relay::RELAY_PATH;
use agent_relay_backend::server::{build_router, shutdown_signal};
use agent_relay_backend::state::AppState;
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Bindings are validated here so a bad AGENT_URL fails at startup
    let app_state = AppState::from_config(&config)?;
    let agent = app_state.bindings.default_agent().clone();

    let app = build_router(app_state);

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!(
        "🚀 Agent relay listening at http://localhost:{}{}",
        addr.port(),
        RELAY_PATH
    );
    info!("🐍 Agent '{}' should be running at {}", agent.name, agent.url);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
