//! Integration tests for app context injection and replacement.

mod helpers;

use std::sync::Arc;

use hookhub_core::config::AppConfig;
use hookhub_core::context::UNINITIALIZED_MESSAGE;
use hookhub_core::error::ErrorKind;
use hookhub_plugin::api::{AppContext, AppContextSlot};

#[test]
fn test_get_before_inject_fails() {
    let slot = AppContextSlot::new();
    let err = slot.get().unwrap_err();

    assert_eq!(err.kind, ErrorKind::Uninitialized);
    assert_eq!(err.message, UNINITIALIZED_MESSAGE);
    assert!(!slot.is_initialized());
}

#[tokio::test]
async fn test_replacement_detaches_previous_document() {
    let app = helpers::TestApp::new().await;
    let hook = app
        .manager("myplugin")
        .await
        .get_dom_hook_api("toolbar", Some("my-toolbar-item"));

    app.insert("toolbar").await;
    assert_eq!(hook.get_all_attached().len(), 1);

    let replacement = Arc::new(AppContext::new(AppConfig::default()));
    app.slot.inject(replacement.clone());

    assert!(hook.get_all_attached().is_empty());
    assert_eq!(app.ctx.document.element_count(), 0);
    assert!(Arc::ptr_eq(&app.slot.get().unwrap(), &replacement));
}

#[tokio::test]
async fn test_take_empties_slot() {
    let app = helpers::TestApp::new().await;
    let taken = app.slot.take().expect("context present");

    assert!(Arc::ptr_eq(&taken, &app.ctx));
    assert_eq!(app.slot.get().unwrap_err().kind, ErrorKind::Uninitialized);
}
