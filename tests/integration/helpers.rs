//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;

use hookhub_core::config::AppConfig;
use hookhub_plugin::api::{AppContext, AppContextSlot};
use hookhub_plugin::element::ElementHandle;
use hookhub_plugin::hooks::DomHooksManager;

/// Test application context
pub struct TestApp {
    /// Slot holding the injected context
    pub slot: AppContextSlot,
    /// The injected context
    pub ctx: Arc<AppContext>,
}

impl TestApp {
    /// Create a test application from the fixture config with its plugins
    /// registered.
    pub async fn new() -> Self {
        let config =
            AppConfig::load("tests/fixtures/test_config.toml").expect("Failed to load test config");
        Self::with_config(config).await
    }

    /// Create a test application from `config` with its plugins registered.
    pub async fn with_config(config: AppConfig) -> Self {
        let slot = AppContextSlot::new();
        slot.inject(Arc::new(AppContext::new(config)));

        let ctx = slot.get().expect("Context not injected");
        ctx.register_declared_plugins()
            .await
            .expect("Failed to register declared plugins");

        Self { slot, ctx }
    }

    /// Hook manager of a registered plugin.
    pub async fn manager(&self, plugin: &str) -> Arc<DomHooksManager> {
        self.ctx
            .plugins
            .hooks(plugin)
            .await
            .expect("Plugin not registered")
    }

    /// Insert `endpoint` into the document with null content.
    pub async fn insert(&self, endpoint: &str) -> Vec<ElementHandle> {
        self.ctx.document.insert_endpoint(endpoint, Value::Null).await
    }
}
