//! Data models
//!
//! Shared between the server and frontend (via API). All wire shapes are
//! camelCase JSON; status enums serialize lowercase. IDs are strings
//! (time-based or counter-based, assigned by the server).

pub mod contact_message;
pub mod gallery_image;
pub mod menu_item;
pub mod order;
pub mod reservation;

// Re-exports
pub use contact_message::*;
pub use gallery_image::*;
pub use menu_item::*;
pub use order::*;
pub use reservation::*;
