//! Status workflow engine
//!
//! Reservations and orders move through fixed transition graphs; every step
//! is checked against the record's current status inside the same write
//! transaction that persists it, so a stale admin view cannot overwrite a
//! newer state. Contact message status is a plain field update and does not
//! go through here.
//!
//! Transition graphs:
//!
//! - Reservation: `pending → confirmed`, `pending → cancelled`
//! - Order: `pending → processing → completed`, and `pending → cancelled`
//!
//! A successful transition enqueues a customer notification; cancelling a
//! reservation does not (the restaurant calls the guest instead).

use thiserror::Error;

use shared::models::{Order, OrderStatus, Reservation, ReservationStatus};

use crate::notify::{Notification, NotifyService};
use crate::store::{CollectionStore, Entity, StoreError};
use crate::utils::AppError;

/// Admin-triggered reservation transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationTransition {
    Confirm,
    Cancel,
}

impl ReservationTransition {
    pub fn target(self) -> ReservationStatus {
        match self {
            Self::Confirm => ReservationStatus::Confirmed,
            Self::Cancel => ReservationStatus::Cancelled,
        }
    }

    /// Both transitions only leave `pending`.
    pub fn allowed_from(self, status: ReservationStatus) -> bool {
        status == ReservationStatus::Pending
    }

    /// Map a requested target status to a transition. `pending` is the entry
    /// state, never a target; requesting it is rejected as a regression.
    pub fn from_target(status: ReservationStatus) -> Option<Self> {
        match status {
            ReservationStatus::Confirmed => Some(Self::Confirm),
            ReservationStatus::Cancelled => Some(Self::Cancel),
            ReservationStatus::Pending => None,
        }
    }
}

/// Admin-triggered order transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderTransition {
    Process,
    Complete,
    Cancel,
}

impl OrderTransition {
    pub fn target(self) -> OrderStatus {
        match self {
            Self::Process => OrderStatus::Processing,
            Self::Complete => OrderStatus::Completed,
            Self::Cancel => OrderStatus::Cancelled,
        }
    }

    pub fn allowed_from(self, status: OrderStatus) -> bool {
        match self {
            Self::Process | Self::Cancel => status == OrderStatus::Pending,
            Self::Complete => status == OrderStatus::Processing,
        }
    }

    pub fn from_target(status: OrderStatus) -> Option<Self> {
        match status {
            OrderStatus::Processing => Some(Self::Process),
            OrderStatus::Completed => Some(Self::Complete),
            OrderStatus::Cancelled => Some(Self::Cancel),
            OrderStatus::Pending => None,
        }
    }
}

/// Workflow failures, mapped onto the API error taxonomy by the handlers.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Illegal status transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::NotFound { .. } => AppError::not_found(err.to_string()),
            WorkflowError::IllegalTransition { .. } => AppError::business_rule(err.to_string()),
            WorkflowError::Store(e) => e.into(),
        }
    }
}

/// Applies status transitions and enqueues the resulting notifications.
#[derive(Clone)]
pub struct WorkflowEngine {
    store: CollectionStore,
    notify: NotifyService,
}

impl WorkflowEngine {
    pub fn new(store: CollectionStore, notify: NotifyService) -> Self {
        Self { store, notify }
    }

    /// Apply a reservation transition. Check-and-set runs inside one write
    /// transaction; the notification is enqueued only after the commit.
    pub fn apply_reservation(
        &self,
        id: &str,
        transition: ReservationTransition,
    ) -> Result<Reservation, WorkflowError> {
        let id = id.to_string();
        let updated = self
            .store
            .update(Reservation::COLLECTION, |items: &mut Vec<Reservation>| {
                let Some(record) = items.iter_mut().find(|r| r.id == id) else {
                    return Err(WorkflowError::NotFound {
                        kind: "Reservation",
                        id,
                    });
                };
                if !transition.allowed_from(record.status) {
                    return Err(WorkflowError::IllegalTransition {
                        from: record.status.as_str().to_string(),
                        to: transition.target().as_str().to_string(),
                    });
                }
                record.status = transition.target();
                Ok(record.clone())
            })??;

        if let Some(notification) = reservation_notification(&updated, transition) {
            self.notify.enqueue(notification);
        }

        tracing::info!(
            id = %updated.id,
            status = updated.status.as_str(),
            "reservation status updated"
        );
        Ok(updated)
    }

    /// Apply an order transition. Same check-and-set shape as reservations.
    pub fn apply_order(
        &self,
        id: &str,
        transition: OrderTransition,
    ) -> Result<Order, WorkflowError> {
        let id = id.to_string();
        let updated = self
            .store
            .update(Order::COLLECTION, |items: &mut Vec<Order>| {
                let Some(record) = items.iter_mut().find(|o| o.id == id) else {
                    return Err(WorkflowError::NotFound { kind: "Order", id });
                };
                if !transition.allowed_from(record.status) {
                    return Err(WorkflowError::IllegalTransition {
                        from: record.status.as_str().to_string(),
                        to: transition.target().as_str().to_string(),
                    });
                }
                record.status = transition.target();
                Ok(record.clone())
            })??;

        self.notify.enqueue(order_notification(&updated, transition));

        tracing::info!(
            id = %updated.id,
            status = updated.status.as_str(),
            "order status updated"
        );
        Ok(updated)
    }
}

fn reservation_notification(
    reservation: &Reservation,
    transition: ReservationTransition,
) -> Option<Notification> {
    match transition {
        ReservationTransition::Confirm => Some(Notification::new(
            "Reservation Confirmed",
            format!(
                "Hello {}, your table reservation has been confirmed. Welcome to Jifora!",
                reservation.name
            ),
        )),
        // Cancellations are followed up by phone, no push message.
        ReservationTransition::Cancel => None,
    }
}

fn order_notification(order: &Order, transition: OrderTransition) -> Notification {
    match transition {
        OrderTransition::Process => Notification::new(
            "Order Processing",
            format!(
                "Hello {}, your order #{} is now being processed. We'll notify you when it's ready!",
                order.customer_name, order.id
            ),
        ),
        OrderTransition::Complete => Notification::new(
            "Order Ready",
            format!(
                "Hello {}, your order #{} is now ready for pickup. Thank you for choosing Jifora!",
                order.customer_name, order.id
            ),
        ),
        OrderTransition::Cancel => Notification::new(
            "Order Cancelled",
            format!(
                "Hello {}, your order #{} has been cancelled. Please contact us if you have any questions.",
                order.customer_name, order.id
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Repository;
    use shared::util;
    use tokio::sync::mpsc;

    fn engine() -> (WorkflowEngine, CollectionStore, mpsc::Receiver<Notification>) {
        let store = CollectionStore::open_in_memory().unwrap();
        let (notify, rx) = NotifyService::new(16);
        (WorkflowEngine::new(store.clone(), notify), store, rx)
    }

    fn seed_reservation(store: &CollectionStore) -> Reservation {
        Repository::<Reservation>::new(store.clone())
            .add(Reservation {
                id: String::new(),
                name: "Ana".into(),
                email: "ana@example.com".into(),
                phone: "+351900000000".into(),
                date: "2026-09-01".into(),
                time: "19:30".into(),
                guests: 2,
                special_requests: None,
                status: ReservationStatus::Pending,
                created_at: util::now_iso(),
            })
            .unwrap()
    }

    fn seed_order(store: &CollectionStore) -> Order {
        Repository::<Order>::new(store.clone())
            .add(Order {
                id: String::new(),
                customer_name: "Bruno".into(),
                customer_email: None,
                customer_phone: None,
                special_instructions: None,
                items: vec![],
                total: 12.5,
                status: OrderStatus::Pending,
                order_date: util::now_iso(),
            })
            .unwrap()
    }

    #[test]
    fn confirm_pending_reservation_persists() {
        let (engine, store, mut rx) = engine();
        let reservation = seed_reservation(&store);

        let updated = engine
            .apply_reservation(&reservation.id, ReservationTransition::Confirm)
            .unwrap();
        assert_eq!(updated.status, ReservationStatus::Confirmed);

        let stored = Repository::<Reservation>::new(store)
            .get(&reservation.id)
            .unwrap();
        assert_eq!(stored.status, ReservationStatus::Confirmed);

        let n = rx.try_recv().unwrap();
        assert_eq!(n.title, "Reservation Confirmed");
        assert!(n.body.contains("Ana"));
    }

    #[test]
    fn cancel_reservation_sends_no_notification() {
        let (engine, store, mut rx) = engine();
        let reservation = seed_reservation(&store);

        engine
            .apply_reservation(&reservation.id, ReservationTransition::Cancel)
            .unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn unknown_reservation_fails_and_leaves_store_untouched() {
        let (engine, store, _rx) = engine();
        let reservation = seed_reservation(&store);

        let err = engine
            .apply_reservation("missing", ReservationTransition::Confirm)
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound { .. }));

        let stored = Repository::<Reservation>::new(store)
            .get(&reservation.id)
            .unwrap();
        assert_eq!(stored.status, ReservationStatus::Pending);
    }

    #[test]
    fn confirmed_reservation_cannot_be_cancelled() {
        let (engine, store, _rx) = engine();
        let reservation = seed_reservation(&store);

        engine
            .apply_reservation(&reservation.id, ReservationTransition::Confirm)
            .unwrap();
        let err = engine
            .apply_reservation(&reservation.id, ReservationTransition::Cancel)
            .unwrap_err();
        assert!(matches!(err, WorkflowError::IllegalTransition { .. }));
    }

    #[test]
    fn order_walks_pending_processing_completed() {
        let (engine, store, mut rx) = engine();
        let order = seed_order(&store);

        let processing = engine.apply_order(&order.id, OrderTransition::Process).unwrap();
        assert_eq!(processing.status, OrderStatus::Processing);
        assert_eq!(rx.try_recv().unwrap().title, "Order Processing");

        let completed = engine.apply_order(&order.id, OrderTransition::Complete).unwrap();
        assert_eq!(completed.status, OrderStatus::Completed);
        assert_eq!(rx.try_recv().unwrap().title, "Order Ready");
    }

    #[test]
    fn completed_order_cannot_go_back_to_processing() {
        let (engine, store, _rx) = engine();
        let order = seed_order(&store);

        engine.apply_order(&order.id, OrderTransition::Process).unwrap();
        engine.apply_order(&order.id, OrderTransition::Complete).unwrap();

        let err = engine
            .apply_order(&order.id, OrderTransition::Process)
            .unwrap_err();
        assert!(matches!(err, WorkflowError::IllegalTransition { .. }));
    }

    #[test]
    fn cancel_only_from_pending() {
        let (engine, store, _rx) = engine();
        let order = seed_order(&store);

        engine.apply_order(&order.id, OrderTransition::Process).unwrap();
        let err = engine
            .apply_order(&order.id, OrderTransition::Cancel)
            .unwrap_err();
        assert!(matches!(err, WorkflowError::IllegalTransition { .. }));
    }

    #[test]
    fn pending_is_never_a_target() {
        assert!(ReservationTransition::from_target(ReservationStatus::Pending).is_none());
        assert!(OrderTransition::from_target(OrderStatus::Pending).is_none());
        assert_eq!(
            OrderTransition::from_target(OrderStatus::Completed),
            Some(OrderTransition::Complete)
        );
    }
}
