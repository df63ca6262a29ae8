//! Entity repositories
//!
//! One uniform contract per entity kind: `list` / `get` / `add` /
//! `update_with` / `delete`. `add` assigns the id (time-based for most
//! entities, counter-scan for orders); `update_with` and `delete` are silent
//! no-ops when the id is absent.

use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;

use shared::models::{ContactMessage, GalleryImage, MenuItem, Order, Reservation};
use shared::util;

use super::{CollectionStore, StoreResult};

/// Storage behaviour of one entity kind.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// Collection name in the store
    const COLLECTION: &'static str;

    /// Insert new records at the front (newest first)
    const PREPEND: bool = false;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Produce a fresh id, unique within the current collection contents.
    fn generate_id(existing: &[Self]) -> String;
}

/// Unix-millis id, bumped until unique within the collection.
fn unique_time_id<T: Entity>(existing: &[T]) -> String {
    let mut candidate = util::now_millis();
    loop {
        let id = candidate.to_string();
        if existing.iter().all(|e| e.id() != id) {
            return id;
        }
        candidate += 1;
    }
}

// ── Entity implementations ──────────────────────────────────────────

impl Entity for Reservation {
    const COLLECTION: &'static str = super::RESERVATIONS;
    const PREPEND: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn generate_id(existing: &[Self]) -> String {
        loop {
            let id = util::short_id();
            if existing.iter().all(|r| r.id != id) {
                return id;
            }
        }
    }
}

impl Entity for Order {
    const COLLECTION: &'static str = super::ORDERS;
    const PREPEND: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    /// `ORD####`: scan existing ids for the highest numeric suffix and
    /// increment (max + 1, not count + 1 — deletions must not recycle ids).
    fn generate_id(existing: &[Self]) -> String {
        let max = existing
            .iter()
            .filter_map(|o| o.id.strip_prefix("ORD").and_then(|n| n.parse::<u32>().ok()))
            .max()
            .unwrap_or(0);
        format!("ORD{:04}", max + 1)
    }
}

impl Entity for MenuItem {
    const COLLECTION: &'static str = super::MENU_ITEMS;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn generate_id(existing: &[Self]) -> String {
        unique_time_id(existing)
    }
}

impl Entity for GalleryImage {
    const COLLECTION: &'static str = super::GALLERY_IMAGES;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn generate_id(existing: &[Self]) -> String {
        unique_time_id(existing)
    }
}

impl Entity for ContactMessage {
    const COLLECTION: &'static str = super::CONTACT_MESSAGES;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn generate_id(existing: &[Self]) -> String {
        unique_time_id(existing)
    }
}

// ── Repository ──────────────────────────────────────────────────────

/// Repository for one entity kind, backed by the collection store.
pub struct Repository<T: Entity> {
    store: CollectionStore,
    _entity: PhantomData<T>,
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Current collection, in stored order.
    pub fn list(&self) -> Vec<T> {
        self.store.load(T::COLLECTION)
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.list().into_iter().find(|e| e.id() == id)
    }

    /// Assign a fresh id and insert. Returns the stored entity.
    pub fn add(&self, mut entity: T) -> StoreResult<T> {
        self.store.update(T::COLLECTION, |items: &mut Vec<T>| {
            entity.set_id(T::generate_id(items));
            if T::PREPEND {
                items.insert(0, entity.clone());
            } else {
                items.push(entity.clone());
            }
            entity
        })
    }

    /// Apply `f` to the matching record and rewrite the collection.
    /// Returns the updated entity, or `None` (no-op) when the id is absent.
    pub fn update_with(
        &self,
        id: &str,
        f: impl FnOnce(&mut T),
    ) -> StoreResult<Option<T>> {
        self.store.update(T::COLLECTION, |items: &mut Vec<T>| {
            items.iter_mut().find(|e| e.id() == id).map(|e| {
                f(e);
                e.clone()
            })
        })
    }

    /// Rewrite the collection without the given id. Returns whether anything
    /// was removed; absent ids are a no-op, not an error.
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        self.store.update(T::COLLECTION, |items: &mut Vec<T>| {
            let before = items.len();
            items.retain(|e| e.id() != id);
            items.len() != before
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{MessageStatus, OrderStatus, ReservationStatus};

    fn store() -> CollectionStore {
        CollectionStore::open_in_memory().unwrap()
    }

    fn sample_reservation() -> Reservation {
        Reservation {
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
        }
    }

    fn sample_order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            customer_name: "Bruno".into(),
            customer_email: None,
            customer_phone: None,
            special_instructions: None,
            items: vec![],
            total: 0.0,
            status: OrderStatus::Pending,
            order_date: util::now_iso(),
        }
    }

    fn sample_menu_item() -> MenuItem {
        MenuItem {
            id: String::new(),
            menu_id: "main".into(),
            name: "Grilled Salmon".into(),
            description: "With lemon butter".into(),
            price: 18.5,
            category: "Mains".into(),
            image: "/img/salmon.jpg".into(),
        }
    }

    #[test]
    fn add_then_list_grows_by_one_with_fresh_id() {
        let repo = Repository::<Reservation>::new(store());
        assert!(repo.list().is_empty());

        let created = repo.add(sample_reservation()).unwrap();
        assert!(!created.id.is_empty());

        let listed = repo.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);

        let second = repo.add(sample_reservation()).unwrap();
        assert_ne!(second.id, created.id);
        assert_eq!(repo.list().len(), 2);
    }

    #[test]
    fn reservations_are_newest_first() {
        let repo = Repository::<Reservation>::new(store());
        let first = repo.add(sample_reservation()).unwrap();
        let second = repo.add(sample_reservation()).unwrap();

        let listed = repo.list();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[test]
    fn order_id_is_max_plus_one() {
        let s = store();
        let repo = Repository::<Order>::new(s.clone());
        s.save(
            crate::store::ORDERS,
            &[sample_order("ORD0001"), sample_order("ORD0007")],
        )
        .unwrap();

        let created = repo.add(sample_order("")).unwrap();
        assert_eq!(created.id, "ORD0008");
    }

    #[test]
    fn first_order_id_is_ord0001() {
        let repo = Repository::<Order>::new(store());
        let created = repo.add(sample_order("")).unwrap();
        assert_eq!(created.id, "ORD0001");
    }

    #[test]
    fn update_with_replaces_fields() {
        let repo = Repository::<MenuItem>::new(store());
        let created = repo.add(sample_menu_item()).unwrap();

        let updated = repo
            .update_with(&created.id, |item| item.price = 21.0)
            .unwrap()
            .expect("item exists");
        assert_eq!(updated.price, 21.0);
        assert_eq!(repo.get(&created.id).unwrap().price, 21.0);
    }

    #[test]
    fn update_absent_id_is_noop() {
        let repo = Repository::<MenuItem>::new(store());
        repo.add(sample_menu_item()).unwrap();

        let result = repo.update_with("missing", |item| item.price = 0.0).unwrap();
        assert!(result.is_none());
        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn delete_removes_and_absent_is_noop() {
        let repo = Repository::<ContactMessage>::new(store());
        let created = repo
            .add(ContactMessage {
                id: String::new(),
                name: "Carla".into(),
                phone: "+351911111111".into(),
                subject: "Hours".into(),
                message: "Are you open Sundays?".into(),
                date_submitted: util::now_iso(),
                status: MessageStatus::New,
            })
            .unwrap();

        assert!(repo.delete(&created.id).unwrap());
        assert!(repo.list().is_empty());

        // No throw, collection unchanged in size
        assert!(!repo.delete(&created.id).unwrap());
        assert!(repo.list().is_empty());
    }

    #[test]
    fn time_based_ids_are_unique_for_rapid_adds() {
        let repo = Repository::<GalleryImage>::new(store());
        let image = GalleryImage {
            id: String::new(),
            title: "Dining room".into(),
            description: "Evening service".into(),
            image_url: "/img/room.jpg".into(),
            category: None,
            date_added: util::now_iso(),
        };
        let a = repo.add(image.clone()).unwrap();
        let b = repo.add(image.clone()).unwrap();
        let c = repo.add(image).unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }
}
