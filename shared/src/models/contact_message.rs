//! Contact Message Model

use serde::{Deserialize, Serialize};

/// Contact message status — starts at `new`, advanced by the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    New,
    Read,
    Replied,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

/// Contact message entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub date_submitted: String,
    pub status: MessageStatus,
}

/// Create contact message payload (public contact form)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageCreate {
    pub name: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}
