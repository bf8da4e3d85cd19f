//! Compiled routes
//!
//! A [`CompiledRoute`] couples a compiled [`Pattern`] with the controller
//! factory, the optional action and the optional route name.

use std::fmt;
use std::rc::Rc;

use crate::{Controller, ControllerFactory, Params, RouterError};

pub mod pattern;

pub use pattern::{Pattern, SEGMENT};

/// A registered route
///
/// Built once, then owned by the route table and never mutated. Registering
/// the same template again produces a new `CompiledRoute`.
pub struct CompiledRoute<C> {
    pattern: Pattern,
    factory: ControllerFactory<C>,
    action: Option<String>,
    name: Option<String>,
}

impl<C: 'static> CompiledRoute<C> {
    /// Compiles `template` and binds it to a controller factory
    ///
    /// The factory runs once per dispatch, so every matched request gets a
    /// fresh controller instance.
    pub fn new<F, T>(template: &str, factory: F) -> Result<Self, RouterError>
    where
        F: Fn() -> T + 'static,
        T: Controller<C> + 'static,
    {
        Self::with_factory(
            template,
            Rc::new(move || Box::new(factory()) as Box<dyn Controller<C>>),
        )
    }

    /// Compiles `template` and binds it to an already boxed factory
    ///
    /// Used when factories come from a lookup table rather than a concrete
    /// controller type.
    pub fn with_factory(template: &str, factory: ControllerFactory<C>) -> Result<Self, RouterError> {
        Ok(Self {
            pattern: Pattern::compile(template)?,
            factory,
            action: None,
            name: None,
        })
    }
}

impl<C> CompiledRoute<C> {
    /// Sets the name used for reversal and for `route:<name>` events
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the action passed through to the controller
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// The original template
    pub fn source(&self) -> &str {
        self.pattern.source()
    }

    /// The compiled pattern
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Placeholder names in template order
    pub fn param_keys(&self) -> &[String] {
        self.pattern.param_keys()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Builds a new controller instance
    pub fn instantiate(&self) -> Box<dyn Controller<C>> {
        (self.factory)()
    }
}

impl<C> Clone for CompiledRoute<C> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            factory: Rc::clone(&self.factory),
            action: self.action.clone(),
            name: self.name.clone(),
        }
    }
}

impl<C> fmt::Debug for CompiledRoute<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRoute")
            .field("source", &self.pattern.source())
            .field("matcher", &self.pattern.matcher().as_str())
            .field("param_keys", &self.pattern.param_keys())
            .field("action", &self.action)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Result of matching a path against the route table
#[derive(Debug)]
pub struct RouteMatch<'r, C> {
    /// The first registered route whose matcher accepted the path
    pub route: &'r CompiledRoute<C>,
    /// Values captured from the path
    pub params: Params,
}
