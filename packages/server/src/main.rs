use anyhow::Context;
use tracing::{info, warn};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.server.max_level())
        .with_target(false)
        .init();

    let state = AppState::from_config(&config.platform)
        .context("Failed to build platform clients")?;

    // A handler with missing settings still answers; it reports the
    // configuration problem on every call.
    if let Err(missing) = &state.block {
        warn!(%missing, "Account blocking is disabled");
    }
    if let Err(missing) = &state.cleanup {
        warn!(%missing, "Event cleanup is disabled");
    }

    let app = server::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
