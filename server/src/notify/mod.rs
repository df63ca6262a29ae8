//! Best-effort customer notifications
//!
//! Status transitions persist first, then enqueue a [`Notification`] on the
//! outbox channel. A background [`NotifyWorker`] consumes the queue and
//! delivers to whoever is subscribed (the admin UI listens over SSE). A
//! notification that cannot be delivered is logged and dropped — it is
//! purely informational and never part of a transition's correctness.

pub mod worker;

pub use worker::NotifyWorker;

use serde::Serialize;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use shared::util;

/// Customer-facing notification
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            body: body.into(),
            created_at: util::now_iso(),
        }
    }
}

/// Notification service — outbox sender plus subscriber fan-out
#[derive(Debug, Clone)]
pub struct NotifyService {
    queue_tx: mpsc::Sender<Notification>,
    subscribers: broadcast::Sender<Notification>,
}

impl NotifyService {
    /// Create the service and the outbox receiver the worker consumes.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (queue_tx, queue_rx) = mpsc::channel(capacity);
        let (subscribers, _) = broadcast::channel(capacity);
        (
            Self {
                queue_tx,
                subscribers,
            },
            queue_rx,
        )
    }

    /// Fire-and-forget enqueue. A full queue drops the notification.
    pub fn enqueue(&self, notification: Notification) {
        if let Err(e) = self.queue_tx.try_send(notification) {
            tracing::warn!(error = %e, "notification queue full, dropping");
        }
    }

    /// Subscribe to delivered notifications (SSE stream, tests).
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.subscribers.subscribe()
    }

    /// Deliver to current subscribers. Returns `false` when nobody is
    /// listening — the caller falls back to logging, nothing is retried.
    pub fn dispatch(&self, notification: &Notification) -> bool {
        self.subscribers.send(notification.clone()).is_ok()
    }
}
