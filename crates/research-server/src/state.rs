//! Application State

use std::sync::Arc;

use agent_core::ToolRegistry;
use crypto_research::ResearchService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Research service (market data source + engines)
    pub research: Arc<ResearchService>,

    /// Tool registry with all available tools
    pub tools: Arc<ToolRegistry>,
}
