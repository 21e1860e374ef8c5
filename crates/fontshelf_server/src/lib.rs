//! HTTP transport for fontshelf.
//!
//! Handlers translate requests into `fontshelf_core` workflow calls and
//! serialize the resulting envelopes. Store handles are built once by the
//! binary and shared through [`state::AppState`].

pub mod config;
pub mod services;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use services::{configure, cors_headers, request_logger};
pub use state::AppState;
