use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rmvc::{
    build_router, executed_event_name, BaseController, Config, Controller, ControllerRegistry,
    Entity, Model, Params, Router, Storage, EXECUTED_EVENT, ROUTE_EVENT,
};
use serde_json::json;

// ============================================================================
// Application fixtures
// ============================================================================

#[derive(Default, Debug)]
struct App {
    storage: Storage,
    rendered: Vec<String>,
}

struct Note(Model);

impl Entity for Note {
    const KIND: &'static str = "Note";

    fn from_model(model: Model) -> Self {
        Note(model)
    }

    fn model(&self) -> &Model {
        &self.0
    }
}

struct Notes {
    base: BaseController<App>,
}

impl Notes {
    fn new(log: Rc<RefCell<Vec<String>>>) -> Self {
        let base = BaseController::new().with_listener(executed_event_name("create"), move |event| {
            log.borrow_mut()
                .push(format!("created {}", event.request.get("title").unwrap_or_default()))
        });
        Self { base }
    }
}

impl Controller<App> for Notes {
    fn execute(&mut self, action: Option<&str>, request: &Params, context: &mut App) {
        match action {
            Some("create") => {
                let mut model = Model::new();
                model.set("title", request.get("title").unwrap_or_default());
                context.storage.set(&Note(model));
            }
            _ => {
                let titles: Vec<String> = context
                    .storage
                    .get_all::<Note>()
                    .iter()
                    .filter_map(|note| note.0.get("title").and_then(|v| v.as_str()).map(str::to_string))
                    .collect();
                context.rendered.push(titles.join(","));
            }
        }

        self.base.execute(action, request, context);
    }
}

const CONFIG: &str = r#"
[app]
name = "notes"

[[routing.routes]]
name = "create"
template = "/notes/new/:title/"
controller = "notes"
action = "create"

[[routing.routes]]
name = "list"
template = "/notes/"
controller = "notes"
"#;

fn app_router(log: &Rc<RefCell<Vec<String>>>) -> Router<App> {
    let config = Config::parse(CONFIG).unwrap();
    let log = Rc::clone(log);

    let registry: ControllerRegistry<App> =
        ControllerRegistry::new().with("notes", move || Notes::new(Rc::clone(&log)));

    build_router(&config.routing, &registry).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_config_driven_app_round_trip() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut router = app_router(&log);

    router
        .route("/notes/new/first/")
        .route("/notes/new/second/")
        .route("/notes/");

    let app = router.context();
    assert_eq!(app.storage.count::<Note>(), 2);
    assert_eq!(app.rendered.len(), 1);

    let mut listed: Vec<&str> = app.rendered[0].split(',').collect();
    listed.sort();
    assert_eq!(listed, vec!["first", "second"]);

    assert_eq!(*log.borrow(), vec!["created first", "created second"]);
}

#[test]
fn test_reverse_from_configured_names() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let router = app_router(&log);

    assert_eq!(
        router.reverse_params("create", &[("title", "todo")]).unwrap(),
        "/notes/new/todo/"
    );
    assert_eq!(router.reverse_bare("list").unwrap(), "/notes/");
}

#[test]
fn test_route_events_see_typed_context() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut router = app_router(&log);

    let counts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&counts);
    router.on(ROUTE_EVENT, move |event| {
        sink.borrow_mut().push(event.context.storage.count::<Note>())
    });

    router.route("/notes/new/a/").route("/notes/new/b/").route("/nowhere/");

    assert_eq!(*counts.borrow(), vec![1, 2]);
}

#[test]
fn test_base_controller_standalone_events() {
    let fired = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&fired);

    let mut controller: BaseController = BaseController::new();
    let id = controller.on(EXECUTED_EVENT, move |_| *sink.borrow_mut() += 1);

    controller.execute(Some("index"), &Params::new(), &mut rmvc::Context::new());
    assert!(controller.off(EXECUTED_EVENT, id));
    controller.execute(Some("index"), &Params::new(), &mut rmvc::Context::new());

    assert_eq!(*fired.borrow(), 1);
    assert_eq!(
        controller.current().and_then(|run| run.action.as_deref()),
        Some("index")
    );
}

#[test]
fn test_model_data_survives_storage() {
    let mut storage = Storage::new();
    let mut model = Model::new();
    model.extend([("title", json!("plan")), ("done", json!(false))]);
    storage.set(&model);

    let stored = storage.get_all::<Model>();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].key(), model.key());
    assert_eq!(stored[0].get("done"), Some(&json!(false)));
}
