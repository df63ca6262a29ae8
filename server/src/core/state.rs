//! Shared server state
//!
//! One [`ServerState`] is built at startup and cloned into every handler.
//! It owns the collection store, the notification service and the config;
//! repositories and the workflow engine are cheap views constructed on
//! demand.

use tokio::sync::mpsc;

use shared::models::{ContactMessage, GalleryImage, MenuItem, Order, Reservation};

use crate::core::config::Config;
use crate::notify::{Notification, NotifyService, NotifyWorker};
use crate::store::{CollectionStore, Repository};
use crate::utils::AppError;
use crate::workflow::WorkflowEngine;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    store: CollectionStore,
    notify: NotifyService,
}

impl ServerState {
    /// Open the store and wire the notification outbox. Returns the outbox
    /// receiver so the caller decides when the worker starts.
    pub fn initialize(config: &Config) -> Result<(Self, mpsc::Receiver<Notification>), AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let database_path = config.database_path();
        tracing::info!(path = %database_path.display(), "opening database");
        let store = CollectionStore::open(&database_path)?;

        let (notify, notify_rx) = NotifyService::new(config.notify_queue_capacity);

        Ok((
            Self {
                config: config.clone(),
                store,
                notify,
            },
            notify_rx,
        ))
    }

    /// Spawn the notification worker on the current runtime.
    pub fn start_background_tasks(&self, notify_rx: mpsc::Receiver<Notification>) {
        tokio::spawn(NotifyWorker::new(&self.notify).run(notify_rx));
    }

    // ========== Repositories ==========

    pub fn menu_items(&self) -> Repository<MenuItem> {
        Repository::new(self.store.clone())
    }

    pub fn reservations(&self) -> Repository<Reservation> {
        Repository::new(self.store.clone())
    }

    pub fn orders(&self) -> Repository<Order> {
        Repository::new(self.store.clone())
    }

    pub fn gallery_images(&self) -> Repository<GalleryImage> {
        Repository::new(self.store.clone())
    }

    pub fn contact_messages(&self) -> Repository<ContactMessage> {
        Repository::new(self.store.clone())
    }

    // ========== Services ==========

    pub fn workflow(&self) -> WorkflowEngine {
        WorkflowEngine::new(self.store.clone(), self.notify.clone())
    }

    pub fn notify(&self) -> &NotifyService {
        &self.notify
    }

    /// In-memory state for handler tests
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let store = CollectionStore::open_in_memory().unwrap();
        let (notify, _rx) = NotifyService::new(16);
        Self {
            config: Config::default(),
            store,
            notify,
        }
    }
}
