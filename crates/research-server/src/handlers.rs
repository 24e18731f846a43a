//! HTTP Handlers

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use agent_core::{AgentError, ToolCall, ToolResult};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub data_source: String,
    pub data_source_connected: bool,
    pub tools: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: &AgentError) -> ApiError {
    let (status, code) = match err {
        AgentError::ToolNotFound(_) => (StatusCode::NOT_FOUND, "TOOL_NOT_FOUND"),
        AgentError::ToolValidation(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENTS"),
        AgentError::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TOOL_ERROR"),
    };

    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let source = state.research.source();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        data_source: source.name().to_string(),
        data_source_connected: source.health_check().await,
        tools: state.tools.len(),
    })
}

/// Function-calling definitions for every registered tool
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<Value>> {
    Json(state.tools.function_definitions())
}

/// Run one tool. The body is the argument object; `x-request-id` becomes the
/// call id, otherwise one is generated.
pub async fn execute_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(arguments): Json<HashMap<String, Value>>,
) -> Result<Json<ToolResult>, ApiError> {
    let id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);

    let call = ToolCall {
        name,
        arguments,
        id: Some(id),
    };

    let result = state.tools.execute(&call).await.map_err(|e| {
        if e.is_client_error() {
            tracing::warn!(tool = %call.name, "Rejected tool call: {}", e);
        } else {
            tracing::error!(tool = %call.name, "Tool error: {}", e);
        }
        api_error(&e)
    })?;

    Ok(Json(result))
}
