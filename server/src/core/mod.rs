//! Core module — server configuration, state and HTTP server
//!
//! - [`Config`] — env-driven configuration
//! - [`ServerState`] — shared handles for all services
//! - [`Server`] — HTTP server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, build_app};
pub use state::ServerState;
