//! # agent-core
//!
//! Provider-agnostic tool framework shared by the research tools and the server.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ToolRegistry                           │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  ToolCall   │──│  validate   │──│   Tool::execute     │  │
//! │  │  (JSON)     │  │  (schema)   │  │   (Strategy)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each `Tool` publishes a `ToolSchema` that doubles as an LLM
//! function-calling definition.

pub mod error;
pub mod tool;

pub use error::{AgentError, Result};
pub use tool::{ParameterSchema, Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
