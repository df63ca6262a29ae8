//! Shared types for the Jifora restaurant platform
//!
//! Data models and small utilities used by the server and by API clients.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
