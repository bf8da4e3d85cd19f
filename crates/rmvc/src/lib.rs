//! # RMVC
//!
//! A small MVC toolkit built around [`rmvc_router`]:
//! - [`Router`] dispatches paths to controllers and reverses named routes
//! - [`BaseController`] records executions and emits `executed` events
//! - [`Model`] and [`Storage`] keep entity data in memory
//! - [`Config`] reads `rmvc.toml`, [`build_router`] turns its routes into a router
//!
//! ## Example
//!
//! ```
//! use rmvc::{build_router, Config, Context, Controller, ControllerRegistry, Params};
//!
//! #[derive(Default)]
//! struct Posts;
//!
//! impl Controller for Posts {
//!     fn execute(&mut self, action: Option<&str>, request: &Params, context: &mut Context) {
//!         context.insert("action", action.unwrap_or("index"));
//!         context.insert("post", request.get("id").unwrap_or_default());
//!     }
//! }
//!
//! let config = Config::parse(r#"
//!     [[routing.routes]]
//!     name = "post"
//!     template = "/posts/:id/"
//!     controller = "posts"
//!     action = "show"
//! "#).unwrap();
//!
//! let registry: ControllerRegistry = ControllerRegistry::new().with("posts", Posts::default);
//! let mut router = build_router(&config.routing, &registry).unwrap();
//!
//! router.route("/posts/42/");
//! assert_eq!(router.context().get("post").unwrap(), "42");
//! assert_eq!(router.reverse_params("post", &[("id", "7")]).unwrap(), "/posts/7/");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod registry;
pub mod storage;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{AppConfig, Config, LoggingConfig, RouteConfig, RoutingConfig};
pub use controller::{executed_event_name, BaseController, ExecutedEvent, Execution, EXECUTED_EVENT};
pub use model::{Entity, Model, ModelSet};
pub use registry::{build_router, ControllerRegistry, RegistryError};
pub use storage::{InstanceStorageAdaptor, Storage, StorageAdaptor, StorageChange};

pub use rmvc_events::{EventEmitter, ListenerId};
pub use rmvc_router::{
    route_event_name, CompiledRoute, Context, Controller, Params, ReverseMode, RouteEvent, Router,
    RouterError, ROUTE_EVENT,
};
