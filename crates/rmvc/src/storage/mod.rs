//! In-memory entity storage
//!
//! [`Storage`] files entity data by kind and key. Nothing is persisted;
//! adaptors that move single models in and out of some backing store
//! implement [`StorageAdaptor`].

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use rmvc_events::{EventEmitter, ListenerId};
use serde_json::{Map, Value};

use crate::{Entity, Model};

pub mod memory;

pub use memory::InstanceStorageAdaptor;

/// Emitted when an entity is stored
pub const STORE_SET_EVENT: &str = "set";
/// Emitted when an entity is removed
pub const STORE_REMOVE_EVENT: &str = "remove";

/// Payload of storage events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageChange<'a> {
    pub kind: &'a str,
    pub key: &'a str,
}

pub type StorageListener = dyn for<'a> Fn(&StorageChange<'a>);

type Bucket = BTreeMap<String, Map<String, Value>>;

/// Per-kind entity store
#[derive(Default)]
pub struct Storage {
    kinds: BTreeMap<String, Bucket>,
    events: EventEmitter<StorageListener>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a snapshot of the entity's data under its kind and key
    ///
    /// Storing the same key again overwrites the earlier snapshot.
    pub fn set<E: Entity>(&mut self, entity: &E) -> &mut Self {
        let model = entity.model();
        let key = model.key().to_string();

        self.kinds
            .entry(E::KIND.to_string())
            .or_default()
            .insert(key.clone(), model.data().clone());

        tracing::trace!(kind = E::KIND, key = %key, "stored entity");
        self.notify(STORE_SET_EVENT, E::KIND, &key);
        self
    }

    /// Stored data for one entity
    pub fn get_data<E: Entity>(&self, key: &str) -> Option<&Map<String, Value>> {
        self.kinds.get(E::KIND)?.get(key)
    }

    /// Rebuilds one entity, keeping its key
    pub fn get<E: Entity>(&self, key: &str) -> Option<E> {
        self.get_data::<E>(key)
            .map(|data| E::from_model(Model::with_key(key, data.clone())))
    }

    /// Rebuilds every stored entity of kind `E`, ordered by key
    pub fn get_all<E: Entity>(&self) -> Vec<E> {
        self.kinds
            .get(E::KIND)
            .map(|bucket| {
                bucket
                    .iter()
                    .map(|(key, data)| E::from_model(Model::with_key(key.as_str(), data.clone())))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains<E: Entity>(&self, key: &str) -> bool {
        self.get_data::<E>(key).is_some()
    }

    /// Number of stored entities of kind `E`
    pub fn count<E: Entity>(&self) -> usize {
        self.kinds.get(E::KIND).map_or(0, BTreeMap::len)
    }

    /// Removes one entity, returning its data
    pub fn remove<E: Entity>(&mut self, key: &str) -> Option<Map<String, Value>> {
        let bucket = self.kinds.get_mut(E::KIND)?;
        let removed = bucket.remove(key)?;
        if bucket.is_empty() {
            self.kinds.remove(E::KIND);
        }

        self.notify(STORE_REMOVE_EVENT, E::KIND, key);
        Some(removed)
    }

    /// Drops every entity of kind `E`, returning how many there were
    pub fn clear_kind<E: Entity>(&mut self) -> usize {
        self.kinds.remove(E::KIND).map_or(0, |bucket| bucket.len())
    }

    pub fn clear(&mut self) {
        self.kinds.clear();
    }

    /// Kinds that currently hold at least one entity
    pub fn kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.kinds.keys().map(String::as_str)
    }

    /// Subscribes to `set` or `remove`
    pub fn on<F>(&mut self, event: impl Into<String>, listener: F) -> ListenerId
    where
        F: for<'a> Fn(&StorageChange<'a>) + 'static,
    {
        self.events.add_listener(event, Box::new(listener))
    }

    pub fn off(&mut self, event: &str, id: ListenerId) -> bool {
        self.events.remove_listener(event, id)
    }

    fn notify(&self, event: &str, kind: &str, key: &str) {
        let change = StorageChange { kind, key };
        self.events.emit_with(event, |listener| listener(&change));
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("kinds", &self.kinds)
            .field("events", &self.events)
            .finish()
    }
}

/// Moves single models in and out of a backing store
pub trait StorageAdaptor {
    fn save(&mut self, model: &Model) -> Result<()>;

    /// Loads the model stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<Model>>;

    /// Adaptor name for diagnostics
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Post(Model);

    impl Entity for Post {
        const KIND: &'static str = "Post";

        fn from_model(model: Model) -> Self {
            Post(model)
        }

        fn model(&self) -> &Model {
            &self.0
        }
    }

    fn post(title: &str) -> Post {
        let mut model = Model::new();
        model.set("title", title);
        Post(model)
    }

    #[test]
    fn test_kinds_are_separate() {
        let mut storage = Storage::new();
        let first = post("hello");
        storage.set(&first).set(&Model::new());

        assert_eq!(storage.kinds().collect::<Vec<_>>(), vec!["Model", "Post"]);
        assert_eq!(storage.count::<Post>(), 1);
        assert!(storage.get_data::<Model>(first.0.key()).is_none());
    }

    #[test]
    fn test_get_rebuilds_with_same_key() {
        let mut storage = Storage::new();
        let original = post("hello");
        storage.set(&original);

        let loaded: Post = storage.get(original.0.key()).unwrap();
        assert_eq!(loaded.0.key(), original.0.key());
        assert_eq!(loaded.0.get("title"), original.0.get("title"));
    }

    #[test]
    fn test_remove_drops_empty_kind() {
        let mut storage = Storage::new();
        let only = post("bye");
        storage.set(&only);

        assert!(storage.remove::<Post>(only.0.key()).is_some());
        assert!(storage.remove::<Post>(only.0.key()).is_none());
        assert_eq!(storage.kinds().count(), 0);
    }

    #[test]
    fn test_events_report_kind_and_key() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut storage = Storage::new();
        storage.on(STORE_SET_EVENT, move |change| {
            sink.borrow_mut().push((change.kind.to_string(), change.key.to_string()))
        });

        let entity = post("hi");
        storage.set(&entity);

        assert_eq!(
            *seen.borrow(),
            vec![("Post".to_string(), entity.0.key().to_string())]
        );
    }
}
