use std::sync::Arc;

use anyhow::Context;
use codegen_relay::{config::AppConfig, routes, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,codegen_relay=debug,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let state = AppState::from_config(&config).context("failed to build chat completion client")?;

    let app = routes::create_router().with_state(Arc::new(state));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, model = %config.model, base_url = %config.base_url, "codegen relay listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
