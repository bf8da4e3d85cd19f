//! # RMVC Events
//!
//! A small named-event emitter shared by the router, controllers, models and
//! storage. Any component that wants to publish notifications owns an
//! [`EventEmitter`] as a plain field instead of inheriting behavior.
//!
//! - Listeners are grouped by event name (`"route"`, `"route:user"`, `"set"`)
//! - Registration hands back a [`ListenerId`] used for removal
//! - Emission calls listeners newest first
//! - The listener type is a parameter, so payloads may borrow
//!
//! ## Example
//!
//! ```
//! use rmvc_events::EventEmitter;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let hits = Rc::new(Cell::new(0));
//! let mut events: EventEmitter<dyn Fn(&u32)> = EventEmitter::new();
//!
//! let counter = Rc::clone(&hits);
//! events.on("tick", move |n| counter.set(counter.get() + *n));
//!
//! events.emit("tick", &2);
//! events.emit("tick", &3);
//! assert_eq!(hits.get(), 5);
//! ```

use std::collections::HashMap;
use std::fmt;

/// Handle returned when a listener is registered
///
/// Closures have no identity, so removal goes through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw numeric value of this id
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Listener collections keyed by event name
///
/// `L` is the (usually unsized) listener type, for example `dyn Fn(&Payload)`
/// or `dyn for<'a> Fn(&Event<'a>)` when the payload borrows.
pub struct EventEmitter<L: ?Sized> {
    events: HashMap<String, Vec<(ListenerId, Box<L>)>>,
    next_id: u64,
}

impl<L: ?Sized> EventEmitter<L> {
    /// Creates an emitter with no listeners
    pub fn new() -> Self {
        Self {
            events: HashMap::new(),
            next_id: 0,
        }
    }

    /// Registers a listener for `event` and returns its id
    pub fn add_listener(&mut self, event: impl Into<String>, listener: Box<L>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.events
            .entry(event.into())
            .or_default()
            .push((id, listener));

        id
    }

    /// Removes a listener by id
    ///
    /// Returns `false` if no such listener was registered for `event`.
    /// The event entry is dropped once its last listener is gone.
    pub fn remove_listener(&mut self, event: &str, id: ListenerId) -> bool {
        let Some(listeners) = self.events.get_mut(event) else {
            return false;
        };

        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        let removed = listeners.len() != before;

        if listeners.is_empty() {
            self.events.remove(event);
        }

        removed
    }

    /// Removes every listener of one event
    pub fn remove_event(&mut self, event: &str) {
        self.events.remove(event);
    }

    /// Removes every listener of every event
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Listeners registered for `event`, in registration order
    pub fn listeners(&self, event: &str) -> impl Iterator<Item = &L> + '_ {
        self.events
            .get(event)
            .into_iter()
            .flat_map(|listeners| listeners.iter().map(|(_, listener)| &**listener))
    }

    /// Number of listeners registered for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.events.get(event).map_or(0, Vec::len)
    }

    /// Whether any listener is registered for `event`
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Names of every event with at least one listener
    pub fn event_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.keys().map(String::as_str)
    }

    /// Invokes every listener of `event`, newest first, through `call`
    ///
    /// Returns the number of listeners invoked.
    pub fn emit_with<F>(&self, event: &str, mut call: F) -> usize
    where
        F: FnMut(&L),
    {
        let Some(listeners) = self.events.get(event) else {
            return 0;
        };

        tracing::trace!(event, listeners = listeners.len(), "emitting event");

        for (_, listener) in listeners.iter().rev() {
            call(&**listener);
        }

        listeners.len()
    }
}

impl<A: ?Sized> EventEmitter<dyn Fn(&A)> {
    /// Registers a closure listener for `event`
    pub fn on<F>(&mut self, event: impl Into<String>, listener: F) -> ListenerId
    where
        F: Fn(&A) + 'static,
    {
        self.add_listener(event, Box::new(listener))
    }

    /// Emits `event` with a shared payload
    pub fn emit(&self, event: &str, args: &A) -> usize {
        self.emit_with(event, |listener| listener(args))
    }
}

impl<L: ?Sized> Default for EventEmitter<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ?Sized> fmt::Debug for EventEmitter<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .events
            .iter()
            .map(|(name, listeners)| (name.as_str(), listeners.len()))
            .collect();

        f.debug_struct("EventEmitter")
            .field("events", &counts)
            .finish()
    }
}
