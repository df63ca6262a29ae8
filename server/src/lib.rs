//! Jifora Restaurant Server
//!
//! Backend for the Jifora restaurant website: public endpoints for the menu,
//! pickup orders, table reservations, gallery and contact form, plus admin
//! endpoints for managing all of it and generating menu QR codes.
//!
//! # Module Structure
//!
//! ```text
//! server/src/
//! ├── core/       # Config, state, HTTP server
//! ├── store/      # redb collection store + entity repositories
//! ├── workflow/   # Reservation/order status state machines
//! ├── notify/     # Notification outbox + background worker
//! ├── qr/         # QR payload builder and image renderer
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # Errors, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod notify;
pub mod qr;
pub mod store;
pub mod utils;
pub mod workflow;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::notify::{Notification, NotifyService, NotifyWorker};
pub use crate::store::{CollectionStore, Repository};
pub use crate::utils::logger::{init_logger, init_logger_with_file};
pub use crate::utils::{AppError, AppResult};
pub use crate::workflow::WorkflowEngine;

/// Load `.env` and initialize logging from `LOG_LEVEL` / `LOG_DIR`.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
       __ _  ____
      / /(_)/ __/___  _______ _
 __  / // // /_ / _ \/ ___/ _ `/
/ /_/ // // __// // / /  / /_/ /
\____//_//_/   \___/_/   \__,_/
    "#
    );
}
