//! Integration tests for hook lookup, attachment, and observation.

mod helpers;

use std::sync::{Arc, Mutex};

use futures::FutureExt;
use serde_json::json;

use hookhub_plugin::element::ElementHandle;

#[tokio::test]
async fn test_declared_hooks_are_cached() {
    let app = helpers::TestApp::new().await;
    let manager = app.manager("myplugin").await;

    assert_eq!(manager.hook_count(), 2);
    let hook = manager.get_dom_hook_api("toolbar", None);
    assert_eq!(hook.module_name(), "myplugin-autogenerated-toolbar");
    assert!(hook.same_hook(&manager.get_dom_hook_api("toolbar", None)));
    assert_eq!(manager.hook_count(), 2);

    let explicit = manager.get_dom_hook_api("toolbar", Some("my-toolbar-item"));
    assert_eq!(explicit.module_name(), "my-toolbar-item");
}

#[tokio::test]
async fn test_placeholder_types_registered() {
    let app = helpers::TestApp::new().await;

    assert_eq!(
        app.ctx.elements.names(),
        vec!["myplugin-autogenerated-toolbar", "other-autogenerated-sidebar"]
    );
    let schema = app
        .ctx
        .elements
        .get("myplugin-autogenerated-toolbar")
        .expect("placeholder registered");
    assert!(schema.has_property("plugin"));
    assert!(schema.has_property("content"));
}

#[tokio::test]
async fn test_observer_sees_every_insert_in_order() {
    let app = helpers::TestApp::new().await;
    let hook = app
        .manager("myplugin")
        .await
        .get_dom_hook_api("toolbar", None);

    let seen: Arc<Mutex<Vec<ElementHandle>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    hook.on_attached(move |el| sink.lock().unwrap().push(el.clone()));

    let first = app.insert("toolbar").await;
    let second = app.insert("toolbar").await;

    let mine: Vec<ElementHandle> = first
        .iter()
        .chain(second.iter())
        .filter(|e| e.type_name() == "myplugin-autogenerated-toolbar")
        .cloned()
        .collect();
    assert_eq!(*seen.lock().unwrap(), mine);
    assert_eq!(hook.get_all_attached(), mine);
}

#[tokio::test]
async fn test_last_attached_waits_for_insert() {
    let app = helpers::TestApp::new().await;
    let hook = app
        .manager("other")
        .await
        .get_dom_hook_api("sidebar", None);

    let a = hook.get_last_attached();
    let b = hook.get_last_attached();
    assert!(a.clone().now_or_never().is_none());

    let inserted = app.ctx.document.insert_endpoint("sidebar", json!({"rows": 3})).await;
    assert_eq!(inserted.len(), 1);

    let first = a.await;
    let second = b.await;
    assert_eq!(first, inserted[0]);
    assert_eq!(second, inserted[0]);
    assert_eq!(first.property("content"), Some(json!({"rows": 3})));
    assert_eq!(first.property("plugin"), Some(json!({"name": "other"})));

    let ready = hook.get_last_attached().now_or_never();
    assert_eq!(ready, Some(inserted[0].clone()));
}

#[tokio::test]
async fn test_remove_preserves_order() {
    let app = helpers::TestApp::new().await;
    let hook = app
        .manager("other")
        .await
        .get_dom_hook_api("sidebar", None);

    let a = app.insert("sidebar").await.remove(0);
    let b = app.insert("sidebar").await.remove(0);
    let c = app.insert("sidebar").await.remove(0);

    assert!(app.ctx.document.remove(&b));
    assert!(!app.ctx.document.remove(&b));
    assert_eq!(hook.get_all_attached(), vec![a.clone(), c.clone()]);

    assert_eq!(app.ctx.document.remove_endpoint("sidebar"), 2);
    assert!(hook.get_all_attached().is_empty());
}
