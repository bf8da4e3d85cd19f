//! # RMVC Router
//!
//! Maps URL paths to controllers:
//! - Named segments in templates (`/users/:id/:slug/`)
//! - First registered match wins (registration order is priority)
//! - Parameters extracted in template order
//! - Named routes reversed back into URLs
//! - `route` and `route:<name>` events on every successful dispatch
//!
//! ## Matching Rules
//!
//! Templates compile to regular expressions anchored at both ends:
//! - `/users/:id/` matches `/users/100/`
//! - but not `/users/100/extra/`, `/users/100` or `users/100/`
//! - placeholders accept `[A-Za-z0-9_-]+`
//! - literal characters, `.` included, match only themselves
//!
//! A path that matches nothing is ignored. It is not an error.
//!
//! ## Example
//!
//! ```
//! use rmvc_router::{Context, Controller, Params, Router};
//!
//! #[derive(Default)]
//! struct Users;
//!
//! impl Controller for Users {
//!     fn execute(&mut self, action: Option<&str>, request: &Params, context: &mut Context) {
//!         context.insert("last_action", action.unwrap_or("none"));
//!         context.insert("last_id", request.get("id").unwrap_or_default());
//!     }
//! }
//!
//! let mut router: Router = Router::new();
//! router
//!     .add_route("user", "/users/:id/:slug/", Users::default, Some("show"))
//!     .unwrap()
//!     .route("/users/200/oliver-c/");
//!
//! assert_eq!(router.context().get("last_id").unwrap(), "200");
//!
//! let url = router
//!     .reverse_params("user", &[("id", "200"), ("slug", "oliver-c")])
//!     .unwrap();
//! assert_eq!(url, "/users/200/oliver-c/");
//! ```

use std::collections::HashMap;
use std::fmt;

use rmvc_events::{EventEmitter, ListenerId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Module Declarations
// ============================================================================

mod context;
mod controller;
mod error;
mod params;
pub mod route;
pub mod table;

pub use context::Context;
pub use controller::{AsAny, Controller, ControllerFactory};
pub use error::RouterError;
pub use params::Params;
pub use route::{CompiledRoute, Pattern, RouteMatch, SEGMENT};
pub use table::RouteTable;

/// Name of the event emitted for every successful dispatch
pub const ROUTE_EVENT: &str = "route";

/// Name of the event emitted for a dispatch to the route called `name`
///
/// ```
/// assert_eq!(rmvc_router::route_event_name("user"), "route:user");
/// ```
pub fn route_event_name(name: &str) -> String {
    format!("{ROUTE_EVENT}:{name}")
}

// ============================================================================
// Core Types
// ============================================================================

/// Payload of `route` and `route:<name>` events
pub struct RouteEvent<'a, C> {
    /// The matched route
    pub route: &'a CompiledRoute<C>,
    /// The controller instance that just executed
    pub controller: &'a dyn Controller<C>,
    /// Values captured from the path
    pub params: &'a Params,
    /// The router context after the controller ran
    pub context: &'a C,
}

/// Listener type for route events
pub type RouteListener<C> = dyn for<'a> Fn(&RouteEvent<'a, C>);

/// What reversal does when a placeholder has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReverseMode {
    /// Fail with [`RouterError::MissingParam`]
    #[default]
    Strict,
    /// Substitute an empty string
    Lenient,
}

/// The router
///
/// Owns the route table, the context passed to controllers and the route
/// event listeners. Not internally synchronized: a host that shares a router
/// between threads of control must serialize access itself.
pub struct Router<C = Context> {
    routes: RouteTable<C>,
    context: Option<C>,
    events: EventEmitter<RouteListener<C>>,
    reverse_mode: ReverseMode,
}

impl<C: Default + 'static> Router<C> {
    /// Creates an empty router with strict reversal
    pub fn new() -> Self {
        Self {
            routes: RouteTable::new(),
            context: None,
            events: EventEmitter::new(),
            reverse_mode: ReverseMode::default(),
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers a named route
    ///
    /// `factory` builds the controller on every dispatch; pass a constructor
    /// such as `MyController::default` or a closure. Routes registered
    /// earlier take priority over later ones.
    pub fn add_route<F, T>(
        &mut self,
        name: &str,
        template: &str,
        factory: F,
        action: Option<&str>,
    ) -> Result<&mut Self, RouterError>
    where
        F: Fn() -> T + 'static,
        T: Controller<C> + 'static,
    {
        let mut route = CompiledRoute::new(template, factory)?.with_name(name);
        if let Some(action) = action {
            route = route.with_action(action);
        }

        Ok(self.insert(route))
    }

    /// Registers a route without a name
    ///
    /// Unnamed routes dispatch normally and emit the generic `route` event,
    /// but cannot be reversed.
    pub fn add_unnamed_route<F, T>(
        &mut self,
        template: &str,
        factory: F,
        action: Option<&str>,
    ) -> Result<&mut Self, RouterError>
    where
        F: Fn() -> T + 'static,
        T: Controller<C> + 'static,
    {
        let mut route = CompiledRoute::new(template, factory)?;
        if let Some(action) = action {
            route = route.with_action(action);
        }

        Ok(self.insert(route))
    }

    /// Registers an already compiled route
    ///
    /// A route with the same template replaces the old one at its original
    /// position.
    pub fn insert(&mut self, route: CompiledRoute<C>) -> &mut Self {
        let source = route.source().to_string();
        let keys = route.param_keys().len();

        match self.routes.insert(route) {
            Some(_) => tracing::debug!(template = %source, keys, "replaced route"),
            None => tracing::debug!(template = %source, keys, "registered route"),
        }

        self
    }

    /// Functional variant of [`Router::insert`]
    pub fn with_route(mut self, route: CompiledRoute<C>) -> Self {
        self.insert(route);
        self
    }

    /// Sets what reversal does with missing parameters
    pub fn with_reverse_mode(mut self, mode: ReverseMode) -> Self {
        self.reverse_mode = mode;
        self
    }

    pub fn set_reverse_mode(&mut self, mode: ReverseMode) -> &mut Self {
        self.reverse_mode = mode;
        self
    }

    pub fn reverse_mode(&self) -> ReverseMode {
        self.reverse_mode
    }

    /// The route table in priority order
    pub fn routes(&self) -> &RouteTable<C> {
        &self.routes
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Finds the route for `path` without running anything
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_, C>> {
        self.routes.match_path(path)
    }

    /// Dispatches `path` to the first matching route
    ///
    /// Builds a controller through the route's factory, runs it with the
    /// route action, the captured parameters and the context, then emits
    /// `route` and (for named routes) `route:<name>`. Does nothing when no
    /// route matches.
    pub fn route(&mut self, path: &str) -> &mut Self {
        let Some(RouteMatch { route, params }) = self.routes.match_path(path) else {
            return self;
        };

        let context = self.context.get_or_insert_with(C::default);

        let mut controller = route.instantiate();
        controller.execute(route.action(), &params, context);

        tracing::debug!(
            path,
            template = route.source(),
            name = route.name().unwrap_or_default(),
            "route matched"
        );

        let event = RouteEvent {
            route,
            controller: &*controller,
            params: &params,
            context: &*context,
        };

        self.events
            .emit_with(ROUTE_EVENT, |listener| listener(&event));

        if let Some(name) = route.name() {
            self.events
                .emit_with(&route_event_name(name), |listener| listener(&event));
        }

        self
    }

    // ========================================================================
    // Reversal
    // ========================================================================

    /// Builds the URL for a named route
    ///
    /// # Examples
    ///
    /// ```
    /// use rmvc_router::{Context, Controller, Params, Router};
    /// use std::collections::HashMap;
    ///
    /// struct Noop;
    /// impl Controller for Noop {
    ///     fn execute(&mut self, _: Option<&str>, _: &Params, _: &mut Context) {}
    /// }
    ///
    /// let mut router: Router = Router::new();
    /// router.add_route("post", "/posts/:year/:slug/", || Noop, None).unwrap();
    ///
    /// let mut data = HashMap::new();
    /// data.insert("year".to_string(), "2024".to_string());
    /// data.insert("slug".to_string(), "hello-world".to_string());
    ///
    /// assert_eq!(router.reverse("post", &data).unwrap(), "/posts/2024/hello-world/");
    /// assert!(router.reverse("missing", &data).is_err());
    /// ```
    pub fn reverse(&self, name: &str, data: &HashMap<String, String>) -> Result<String, RouterError> {
        self.reverse_with(name, |key| data.get(key).map(String::as_str))
    }

    /// Builds the URL for a named route from `(key, value)` pairs
    pub fn reverse_params(&self, name: &str, data: &[(&str, &str)]) -> Result<String, RouterError> {
        self.reverse_with(name, |key| {
            data.iter()
                .find(|(candidate, _)| *candidate == key)
                .map(|(_, value)| *value)
        })
    }

    /// Builds the URL for a named route that takes no parameters
    pub fn reverse_bare(&self, name: &str) -> Result<String, RouterError> {
        self.reverse_with(name, |_| None)
    }

    fn reverse_with<'v, F>(&self, name: &str, mut lookup: F) -> Result<String, RouterError>
    where
        F: FnMut(&str) -> Option<&'v str>,
    {
        let route = self
            .routes
            .find_by_name(name)
            .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))?;

        let lenient = self.reverse_mode == ReverseMode::Lenient;

        route
            .pattern()
            .substitute(|key| lookup(key).or(if lenient { Some("") } else { None }))
            .map_err(|param| RouterError::MissingParam {
                route: name.to_string(),
                param,
            })
    }

    // ========================================================================
    // Context
    // ========================================================================

    /// The context object, created empty on first access
    pub fn context(&mut self) -> &mut C {
        self.context.get_or_insert_with(C::default)
    }

    /// The context object if it has been created or set
    pub fn peek_context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    /// Replaces the context object wholesale
    pub fn set_context(&mut self, context: C) -> &mut Self {
        self.context = Some(context);
        self
    }

    /// Functional variant of [`Router::set_context`]
    pub fn with_context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Subscribes to `route` or `route:<name>`
    pub fn on<F>(&mut self, event: impl Into<String>, listener: F) -> ListenerId
    where
        F: for<'a> Fn(&RouteEvent<'a, C>) + 'static,
    {
        self.events.add_listener(event, Box::new(listener))
    }

    /// Unsubscribes a listener returned by [`Router::on`]
    pub fn off(&mut self, event: &str, id: ListenerId) -> bool {
        self.events.remove_listener(event, id)
    }

    pub fn events(&self) -> &EventEmitter<RouteListener<C>> {
        &self.events
    }
}

impl<C: Default + 'static> Default for Router<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: fmt::Debug> fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("context", &self.context)
            .field("events", &self.events)
            .field("reverse_mode", &self.reverse_mode)
            .finish()
    }
}
