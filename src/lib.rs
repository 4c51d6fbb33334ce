#![deny(unreachable_pub)]

// Core modules
pub mod config;
pub mod consts;
mod errors;
mod helpers;
pub mod logging;
mod prelude;
pub mod req;

// Shared utilities
pub mod serde_utils;
pub mod types;

// Tool layer
pub mod commands;
pub mod format;
pub mod registry;
pub mod response;
pub mod server;

// Re-exports
pub use commands::FirstPromoterClient;
pub use config::{AppConfig, Credentials, ServerConfig, TransportMode};
pub use errors::{DispatchError, Error};
pub use helpers::BaseUrl;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use registry::{ToolCall, ToolRegistry, ToolSpec, TOOLS};
pub use response::{Envelope, Page};
pub use server::McpServer;
