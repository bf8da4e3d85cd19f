//! Controller registry and router construction from configuration

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use rmvc_router::{CompiledRoute, Context, Controller, ControllerFactory, Router, RouterError};
use thiserror::Error;

use crate::config::RoutingConfig;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown controller: {0:?}")]
    UnknownController(String),

    #[error(transparent)]
    Router(#[from] RouterError),
}

/// Controller factories by name
///
/// Configuration refers to controllers by name; the registry turns those
/// names back into factories.
pub struct ControllerRegistry<C = Context> {
    factories: HashMap<String, ControllerFactory<C>>,
}

impl<C: 'static> ControllerRegistry<C> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers `factory` under `name`, replacing any earlier one
    pub fn register<F, T>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Controller<C> + 'static,
    {
        let factory: ControllerFactory<C> =
            Rc::new(move || Box::new(factory()) as Box<dyn Controller<C>>);
        self.factories.insert(name.into(), factory);
        self
    }

    /// Chainable variant of [`ControllerRegistry::register`]
    pub fn with<F, T>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> T + 'static,
        T: Controller<C> + 'static,
    {
        self.register(name, factory);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ControllerFactory<C>> {
        self.factories.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<C: 'static> Default for ControllerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ControllerRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ControllerRegistry")
            .field("controllers", &names)
            .finish()
    }
}

/// Builds a router from the `[routing]` section
///
/// Routes are registered in file order, so earlier entries take priority.
/// Fails on the first route whose controller is not registered or whose
/// template does not compile.
pub fn build_router<C>(
    routing: &RoutingConfig,
    registry: &ControllerRegistry<C>,
) -> Result<Router<C>, RegistryError>
where
    C: Default + 'static,
{
    let mut router = Router::new().with_reverse_mode(routing.reverse_mode());

    for entry in &routing.routes {
        let factory = registry
            .get(&entry.controller)
            .ok_or_else(|| RegistryError::UnknownController(entry.controller.clone()))?;

        let mut route = CompiledRoute::with_factory(&entry.template, Rc::clone(factory))?;
        if let Some(name) = &entry.name {
            route = route.with_name(name.as_str());
        }
        if let Some(action) = &entry.action {
            route = route.with_action(action.as_str());
        }

        router.insert(route);
    }

    tracing::debug!(routes = router.routes().len(), "built router from config");
    Ok(router)
}
