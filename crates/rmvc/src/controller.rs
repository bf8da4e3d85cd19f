//! Base controller
//!
//! [`BaseController`] is a ready-made [`Controller`] that remembers its
//! last execution and announces it through `executed` and
//! `executed:<action>` events. Application controllers usually embed one
//! and forward `execute` to it.

use std::fmt;

use rmvc_events::{EventEmitter, ListenerId};
use rmvc_router::{Context, Controller, Params};

/// Emitted after every execution
pub const EXECUTED_EVENT: &str = "executed";

/// Name of the event emitted after executing `action`
pub fn executed_event_name(action: &str) -> String {
    format!("{EXECUTED_EVENT}:{action}")
}

/// The most recent call to [`Controller::execute`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Execution {
    pub action: Option<String>,
    pub request: Params,
}

/// Payload of `executed` events
pub struct ExecutedEvent<'a, C> {
    pub action: Option<&'a str>,
    pub request: &'a Params,
    pub context: &'a C,
}

pub type ExecutedListener<C> = dyn for<'a> Fn(&ExecutedEvent<'a, C>);

pub struct BaseController<C = Context> {
    current: Option<Execution>,
    events: EventEmitter<ExecutedListener<C>>,
}

impl<C: 'static> BaseController<C> {
    pub fn new() -> Self {
        Self {
            current: None,
            events: EventEmitter::new(),
        }
    }

    /// The last execution, if the controller has run
    pub fn current(&self) -> Option<&Execution> {
        self.current.as_ref()
    }

    /// Subscribes to `executed` or `executed:<action>`
    pub fn on<F>(&mut self, event: impl Into<String>, listener: F) -> ListenerId
    where
        F: for<'a> Fn(&ExecutedEvent<'a, C>) + 'static,
    {
        self.events.add_listener(event, Box::new(listener))
    }

    /// Chainable variant of [`BaseController::on`]
    pub fn with_listener<F>(mut self, event: impl Into<String>, listener: F) -> Self
    where
        F: for<'a> Fn(&ExecutedEvent<'a, C>) + 'static,
    {
        self.on(event, listener);
        self
    }

    pub fn off(&mut self, event: &str, id: ListenerId) -> bool {
        self.events.remove_listener(event, id)
    }
}

impl<C: 'static> Controller<C> for BaseController<C> {
    fn execute(&mut self, action: Option<&str>, request: &Params, context: &mut C) {
        self.current = Some(Execution {
            action: action.map(str::to_string),
            request: request.clone(),
        });

        let event = ExecutedEvent {
            action,
            request,
            context: &*context,
        };

        self.events
            .emit_with(EXECUTED_EVENT, |listener| listener(&event));

        if let Some(action) = action {
            self.events
                .emit_with(&executed_event_name(action), |listener| listener(&event));
        }
    }
}

impl<C: 'static> Default for BaseController<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for BaseController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseController")
            .field("current", &self.current)
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_records_current_execution() {
        let mut controller: BaseController = BaseController::new();
        assert!(controller.current().is_none());

        let request: Params = [("id", "3")].into_iter().collect();
        controller.execute(Some("show"), &request, &mut Context::new());

        assert_eq!(
            controller.current(),
            Some(&Execution {
                action: Some("show".to_string()),
                request,
            })
        );
    }

    #[test]
    fn test_emits_generic_then_action_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));

        let generic = Rc::clone(&seen);
        let specific = Rc::clone(&seen);
        let mut controller: BaseController = BaseController::new()
            .with_listener(EXECUTED_EVENT, move |_| generic.borrow_mut().push("executed"))
            .with_listener(executed_event_name("show"), move |_| {
                specific.borrow_mut().push("executed:show")
            });

        controller.execute(Some("show"), &Params::new(), &mut Context::new());
        controller.execute(None, &Params::new(), &mut Context::new());

        assert_eq!(*seen.borrow(), vec!["executed", "executed:show", "executed"]);
    }
}
