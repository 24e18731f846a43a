//! research-server
//!
//! Axum-based server exposing the crypto research tools over a REST API.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::ToolRegistry;
use crypto_research::{
    register_tools, OnchainAnalytics, ResearchConfig, ResearchService, UnavailableOnchain,
};

use crate::handlers::{execute_tool, health_check, list_tools};
use crate::state::AppState;

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(execute_tool))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ResearchConfig::from_env()?;
    let research = Arc::new(ResearchService::from_config(config)?);

    let source = research.source();
    if source.health_check().await {
        tracing::info!("✓ Connected to {}", source.name());
    } else {
        tracing::warn!("⚠ {} not reachable - market data tools will report errors", source.name());
        tracing::warn!("  Set RESEARCH_MOCK=1 to serve synthetic data instead");
    }

    // No on-chain provider is bundled; those tools answer with a clear error
    let onchain = Arc::new(OnchainAnalytics::new(Arc::new(UnavailableOnchain)));

    let mut tools = ToolRegistry::new();
    register_tools(&mut tools, &research, &onchain);

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let state = AppState {
        research,
        tools: Arc::new(tools),
    };
    let app = router(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 research-server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /api/tools         - Tool function definitions");
    tracing::info!("  POST /api/tools/{{name}}  - Execute a tool");

    axum::serve(listener, app).await?;

    Ok(())
}
