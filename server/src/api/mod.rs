//! REST API
//!
//! One module per resource, each exposing a `router()` nested under its
//! `/api/...` prefix. Handlers stay thin: validate, call a repository or the
//! workflow engine, map errors through [`crate::utils::AppError`].

pub mod auth;
pub mod contact;
pub mod gallery;
pub mod health;
pub mod menu;
pub mod notifications;
pub mod orders;
pub mod qr_codes;
pub mod reservations;
