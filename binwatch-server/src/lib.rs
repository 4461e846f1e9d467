//! HTTP boundary for binwatch: JSON API, dashboard pages, and the insight proxy.

/// Environment-driven settings.
pub mod config;
/// API error type and its HTTP rendering.
pub mod error;
/// Generative-text passthrough.
pub mod insight;
/// Tracing subscriber setup.
pub mod logging;
/// Dashboard page templates.
pub mod pages;
/// Request handlers.
pub mod routes;
/// Router assembly and serving.
pub mod server;
/// Shared handler state.
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use insight::{GeminiClient, InsightError, InsightPort};
pub use pages::PageTemplates;
pub use server::{build_state, router, serve};
pub use state::AppState;
