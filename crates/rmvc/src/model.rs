//! Models and entities
//!
//! A [`Model`] is a string-keyed bag of JSON values with a lazily assigned
//! unique key. Typed entities wrap a model and implement [`Entity`] so
//! [`Storage`](crate::Storage) can file them by kind.

use std::fmt;

use once_cell::unsync::OnceCell;
use rmvc_events::{EventEmitter, ListenerId};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Emitted by [`Model::set`]
pub const SET_EVENT: &str = "set";

/// Payload of model `set` events
#[derive(Debug)]
pub struct ModelSet<'a> {
    pub key: &'a str,
    pub value: &'a Value,
}

pub type ModelListener = dyn for<'a> Fn(&ModelSet<'a>);

pub struct Model {
    data: Map<String, Value>,
    key: OnceCell<String>,
    events: EventEmitter<ModelListener>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            data: Map::new(),
            key: OnceCell::new(),
            events: EventEmitter::new(),
        }
    }

    /// Builds a model holding `data`
    pub fn from_data(data: Map<String, Value>) -> Self {
        Self {
            data,
            ..Self::new()
        }
    }

    /// Builds a model that already has a key, e.g. when reloading stored data
    pub fn with_key(key: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            data,
            key: OnceCell::with_value(key.into()),
            events: EventEmitter::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// All stored fields
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Stores a field and emits `set`
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();

        let event = ModelSet {
            key: &key,
            value: &value,
        };
        self.events.emit_with(SET_EVENT, |listener| listener(&event));

        self.data.insert(key, value);
        self
    }

    /// Stores every pair, emitting `set` for each
    pub fn extend<I, K, V>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in fields {
            self.set(key, value);
        }
        self
    }

    /// The model's unique key, generated on first call
    pub fn key(&self) -> &str {
        self.key.get_or_init(|| Uuid::new_v4().to_string())
    }

    pub fn on<F>(&mut self, event: impl Into<String>, listener: F) -> ListenerId
    where
        F: for<'a> Fn(&ModelSet<'a>) + 'static,
    {
        self.events.add_listener(event, Box::new(listener))
    }

    pub fn off(&mut self, event: &str, id: ListenerId) -> bool {
        self.events.remove_listener(event, id)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("key", &self.key.get())
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// A model type that storage can file under its own kind
///
/// ```
/// use rmvc::{Entity, Model};
///
/// struct User(Model);
///
/// impl Entity for User {
///     const KIND: &'static str = "User";
///
///     fn from_model(model: Model) -> Self {
///         User(model)
///     }
///
///     fn model(&self) -> &Model {
///         &self.0
///     }
/// }
/// ```
pub trait Entity: Sized {
    /// Storage bucket name
    const KIND: &'static str;

    fn from_model(model: Model) -> Self;

    fn model(&self) -> &Model;
}

impl Entity for Model {
    const KIND: &'static str = "Model";

    fn from_model(model: Model) -> Self {
        model
    }

    fn model(&self) -> &Model {
        self
    }
}
