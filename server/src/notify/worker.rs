//! Notification delivery worker
//!
//! Single consumer of the outbox queue. Holds only the subscriber fan-out so
//! the queue closes (and the worker exits) once every service handle drops.

use tokio::sync::{broadcast, mpsc};

use super::{Notification, NotifyService};

pub struct NotifyWorker {
    subscribers: broadcast::Sender<Notification>,
}

impl NotifyWorker {
    pub fn new(service: &NotifyService) -> Self {
        Self {
            subscribers: service.subscribers.clone(),
        }
    }

    /// Consume the outbox until the channel closes.
    pub async fn run(self, mut queue_rx: mpsc::Receiver<Notification>) {
        tracing::info!("Notification worker started");

        while let Some(notification) = queue_rx.recv().await {
            if self.subscribers.send(notification.clone()).is_ok() {
                tracing::debug!(
                    id = %notification.id,
                    title = %notification.title,
                    "notification delivered"
                );
            } else {
                tracing::info!(
                    id = %notification.id,
                    title = %notification.title,
                    "no notification subscribers, dropped"
                );
            }
        }

        tracing::info!("Notification worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn worker_stops_when_service_drops() {
        let (service, rx) = NotifyService::new(4);
        let handle = tokio::spawn(NotifyWorker::new(&service).run(rx));

        service.enqueue(Notification::new("Order Ready", "Hello"));
        drop(service);

        // Queue drains, then the channel closes and run() returns.
        handle.await.unwrap();
    }
}
