//! Handler boundary between the router and controllers

use std::any::Any;
use std::rc::Rc;

use crate::{Context, Params};

/// Builds a fresh controller for one dispatch
pub type ControllerFactory<C> = Rc<dyn Fn() -> Box<dyn Controller<C>>>;

/// Upcast helper so route listeners can downcast the controller they receive
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A routable controller
///
/// The router calls [`Controller::execute`] once per matched path with the
/// route's action (if any), the captured parameters and the router context.
/// Whatever the controller does with them is its own business.
///
/// # Examples
///
/// ```
/// use rmvc_router::{Context, Controller, Params};
///
/// #[derive(Default)]
/// struct ShowUser {
///     last_id: Option<String>,
/// }
///
/// impl Controller for ShowUser {
///     fn execute(&mut self, _action: Option<&str>, request: &Params, _context: &mut Context) {
///         self.last_id = request.get("id").map(str::to_string);
///     }
/// }
/// ```
pub trait Controller<C = Context>: AsAny {
    fn execute(&mut self, action: Option<&str>, request: &Params, context: &mut C);
}
