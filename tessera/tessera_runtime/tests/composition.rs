use std::path::Path;

use tempfile::TempDir;
use tessera_core::{ComponentIdentity, ComponentReference, InstanceId, RenderRequest, Session, User};
use tessera_runtime::config::RuntimeConfig;
use tessera_runtime::context::RenderContext;
use tessera_runtime::directive::compose;
use tessera_runtime::Runtime;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn components() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "example/meta.json",
        r#"{"id": "example", "version": "0.0.1", "views": {"index": {}}}"#,
    );
    write(
        root,
        "button/1.0/meta.json",
        r#"{
            "id": "button",
            "version": "1.0",
            "css": ["/button/1.0/css/index.css"],
            "views": {
                "index": {},
                "restricted": {"controller": "index.js", "permissions": ["view_restricted"]}
            }
        }"#,
    );
    write(
        root,
        "button/2.0/meta.json",
        r#"{
            "id": "button",
            "version": "2.0",
            "dynamic_conditions": [{"condition": "country", "allowed": ["US"]}],
            "views": {
                "index": {"dynamic_conditions": [{"condition": "language", "allowed": ["en_US"]}]},
                "buttons": {"controller": "index.js"}
            }
        }"#,
    );
    write(
        root,
        "error/1.0/meta.json",
        r#"{"id": "error", "version": "1.0", "views": {"401": {}, "404": {}, "500": {}}}"#,
    );
    write(root, "error/1.0/views/404.html", "<p>Not found</p>");

    dir
}

async fn runtime(dir: &TempDir) -> Runtime {
    let config = RuntimeConfig {
        components_directory: dir.path().to_str().unwrap().to_string(),
        ..RuntimeConfig::default()
    };
    Runtime::new(config).await.unwrap()
}

fn user_session() -> Session {
    Session::for_user(
        User::new()
            .with_permissions(["view_button", "view_restricted"])
            .with_country("US")
            .with_language("en_US"),
    )
}

fn compose_one(runtime: &Runtime, directive: &str, session: Option<Session>) -> (String, String, String) {
    let mut ctx = RenderContext::new(ComponentIdentity::new("example", "0.0.1"), session);
    compose(directive, runtime.resolver(), &mut ctx);
    assert_eq!(ctx.children().len(), 1);
    let child = &ctx.children()[0];
    (child.id.clone(), child.version.clone(), child.controller.clone())
}

fn error(code: u16) -> (String, String, String) {
    ("error".to_string(), "1.0".to_string(), format!("{}.js", code))
}

fn component(id: &str, version: &str, controller: &str) -> (String, String, String) {
    (id.to_string(), version.to_string(), controller.to_string())
}

#[tokio::test]
async fn test_required_fields() {
    let dir = components();
    let runtime = runtime(&dir).await;

    assert_eq!(compose_one(&runtime, r#"{{component name="button"}}"#, None), error(500));
    assert_eq!(
        compose_one(&runtime, r#"{{component version="1.1" view="index"}}"#, None),
        error(500)
    );
    assert_eq!(
        compose_one(&runtime, r#"{{component name="button" version="1.0" view="index"}}"#, None),
        component("button", "1.0", "index.js")
    );
}

#[tokio::test]
async fn test_defaults_and_not_found() {
    let dir = components();
    let runtime = runtime(&dir).await;

    assert_eq!(
        compose_one(&runtime, r#"{{component view="index"}}"#, None),
        component("example", "0.0.1", "index.js")
    );
    assert_eq!(
        compose_one(&runtime, r#"{{component name="invalid_name" view="index"}}"#, None),
        error(404)
    );
    assert_eq!(
        compose_one(&runtime, r#"{{component name="button" view="invalid_index"}}"#, None),
        error(404)
    );    assert_eq!(
        compose_one(
            &runtime,
            r#"{{component name="button" version="1.0" view="invalid_index"}}"#,
            None
        ),
        error(404)
    );
    assert_eq!(
        compose_one(&runtime, r#"{{component name="button" version="9.9" view="index"}}"#, None),
        error(404)
    );
}

#[tokio::test]
async fn test_static_permissions() {
    let dir = components();
    let runtime = runtime(&dir).await;
    let directive = r#"{{component name="button" version="1.0" view="restricted"}}"#;

    assert_eq!(compose_one(&runtime, directive, None), error(401));
    assert_eq!(
        compose_one(&runtime, directive, Some(user_session())),
        component("button", "1.0", "index.js")
    );
}

#[tokio::test]
async fn test_dynamic_conditions() {
    let dir = components();
    let runtime = runtime(&dir).await;
    let buttons = r#"{{component name="button" version="2.0" view="buttons"}}"#;
    let index = r#"{{component name="button" version="2.0" view="index"}}"#;

    assert_eq!(
        compose_one(&runtime, buttons, Some(user_session())),
        component("button", "2.0", "index.js")
    );
    assert_eq!(
        compose_one(&runtime, buttons, Some(Session::for_user(User::new().with_country("RO")))),
        error(401)
    );

    assert_eq!(
        compose_one(&runtime, index, Some(user_session())),
        component("button", "2.0", "index.js")
    );
    let romanian = Session::for_user(User::new().with_country("US").with_language("ro_RO"));
    assert_eq!(compose_one(&runtime, index, Some(romanian)), error(401));
}

#[tokio::test]
async fn test_disabled_condition_denies() {
    let dir = components();
    let config = RuntimeConfig {
        components_directory: dir.path().to_str().unwrap().to_string(),
        conditions: vec!["language".to_string()],
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::new(config).await.unwrap();

    assert_eq!(
        compose_one(
            &runtime,
            r#"{{component name="button" version="2.0" view="buttons"}}"#,
            Some(user_session())
        ),
        error(401)
    );
}

#[tokio::test]
async fn test_instance_ids_survive_serialization() {
    let dir = components();
    let runtime = runtime(&dir).await;
    let mut ctx = RenderContext::new(ComponentIdentity::new("example", "0.0.1"), None);

    let reference = ComponentReference::new("index").with_name("button").with_version("1.0");
    let descriptor = runtime.resolver().resolve(&reference, &mut ctx);

    let json = serde_json::to_string(ctx.children()).unwrap();
    let parsed: Vec<tessera_core::ComponentDescriptor> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0].instance_id, descriptor.instance_id);

    let (children, css) = ctx.into_parts(true);
    assert_eq!(children[0].instance_id, descriptor.instance_id);
    assert_eq!(css, vec!["/button/1.0/css/index.css"]);
}

#[tokio::test]
async fn test_render_request_falls_back_to_error_markup() {
    let dir = components();
    let runtime = runtime(&dir).await;
    let instance_id = InstanceId::new();

    let payload = runtime
        .service()
        .handle(&RenderRequest::new("button", "3.0", "index", instance_id), None);

    assert_eq!(payload.id, "error");
    assert_eq!(payload.view, "404");
    assert_eq!(payload.instance_id, instance_id);
    assert_eq!(payload.html, "<p>Not found</p>");
}
