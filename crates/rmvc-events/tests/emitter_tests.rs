//! Integration tests for rmvc-events
//!
//! Covers the behaviors other rmvc crates rely on:
//! - Broad and narrow event names
//! - Listener removal
//! - Borrowed payloads through `emit_with`

use pretty_assertions::assert_eq;
use rmvc_events::EventEmitter;
use std::cell::RefCell;
use std::rc::Rc;

struct Saved<'a> {
    key: &'a str,
    value: &'a str,
}

type SavedListener = dyn for<'a> Fn(&Saved<'a>);

#[test]
fn test_broad_and_narrow_events_are_independent() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut events: EventEmitter<dyn Fn(&String)> = EventEmitter::new();

    let broad = Rc::clone(&seen);
    events.on("route", move |name| broad.borrow_mut().push(format!("any:{name}")));

    let narrow = Rc::clone(&seen);
    events.on("route:home", move |name| narrow.borrow_mut().push(format!("home:{name}")));

    let name = "home".to_string();
    events.emit("route", &name);
    events.emit("route:home", &name);
    events.emit("route:other", &name);

    assert_eq!(*seen.borrow(), vec!["any:home", "home:home"]);
}

#[test]
fn test_removed_listener_is_not_called() {
    let calls = Rc::new(RefCell::new(0));
    let mut events: EventEmitter<dyn Fn(&())> = EventEmitter::new();

    let counter = Rc::clone(&calls);
    let id = events.on("tick", move |_| *counter.borrow_mut() += 1);

    events.emit("tick", &());
    assert!(events.remove_listener("tick", id));
    events.emit("tick", &());

    assert_eq!(*calls.borrow(), 1);
    assert_eq!(events.listener_count("tick"), 0);
}

#[test]
fn test_borrowed_payload_with_emit_with() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut events: EventEmitter<SavedListener> = EventEmitter::new();

    let sink = Rc::clone(&seen);
    events.add_listener(
        "set",
        Box::new(move |saved: &Saved<'_>| {
            sink.borrow_mut()
                .push(format!("{}={}", saved.key, saved.value));
        }),
    );

    let key = String::from("title");
    let value = String::from("hello");
    let invoked = events.emit_with("set", |listener| {
        listener(&Saved {
            key: &key,
            value: &value,
        })
    });

    assert_eq!(invoked, 1);
    assert_eq!(*seen.borrow(), vec!["title=hello"]);
}

#[test]
fn test_clear_removes_everything() {
    let mut events: EventEmitter<dyn Fn(&())> = EventEmitter::new();
    events.on("a", |_| {});
    events.on("b", |_| {});

    events.clear();

    assert_eq!(events.event_names().count(), 0);
    assert_eq!(events.emit("a", &()), 0);
}
