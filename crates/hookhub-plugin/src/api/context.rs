//! Application context: the services the host hands to plugin code.

use std::sync::Arc;

use tracing::{info, warn};

use hookhub_core::config::AppConfig;
use hookhub_core::context::{ContextSlot, Finalizable};
use hookhub_core::result::AppResult;

use crate::element::ElementTypeRegistry;
use crate::registry::{PluginRegistry, StaticPlugin};
use crate::runtime::Document;

/// Slot holding the live [`AppContext`].
pub type AppContextSlot = ContextSlot<AppContext>;

/// Services shared by the host and every plugin.
#[derive(Clone)]
pub struct AppContext {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Element types known to the document.
    pub elements: Arc<ElementTypeRegistry>,
    /// Registered plugins and their hook managers.
    pub plugins: Arc<PluginRegistry>,
    /// Live endpoint elements.
    pub document: Arc<Document>,
}

impl AppContext {
    /// Wires the services for `config`. No plugin is registered yet.
    pub fn new(config: AppConfig) -> Self {
        let elements = Arc::new(ElementTypeRegistry::new());
        let plugins = Arc::new(PluginRegistry::new(elements.clone()));
        let document = Arc::new(Document::new(plugins.clone()));

        Self {
            config: Arc::new(config),
            elements,
            plugins,
            document,
        }
    }

    /// Registers every plugin declared in configuration and requests its
    /// hooks. Returns the number of hooks requested.
    ///
    /// If a plugin fails to register, the plugins registered by this call
    /// are unregistered again before the error is returned.
    pub async fn register_declared_plugins(&self) -> AppResult<usize> {
        let mut registered: Vec<&str> = Vec::new();
        let mut requested = 0;

        for declaration in &self.config.plugins.plugins {
            let manager = match self
                .plugins
                .register(Arc::new(StaticPlugin::new(declaration.name.clone())))
                .await
            {
                Ok(manager) => manager,
                Err(e) => {
                    self.rollback(&registered).await;
                    return Err(e);
                }
            };
            registered.push(&declaration.name);

            for hook in &declaration.hooks {
                manager.get_dom_hook(&hook.endpoint, hook.module.as_deref());
                requested += 1;
            }
        }

        info!(
            plugins = registered.len(),
            hooks = requested,
            "Declared plugins registered"
        );

        Ok(requested)
    }

    async fn rollback(&self, registered: &[&str]) {
        for name in registered.iter().rev() {
            if let Err(e) = self.plugins.unregister(name).await {
                warn!(plugin = %name, error = %e, "Rollback of plugin registration failed");
            }
        }
        warn!(plugins = registered.len(), "Declared plugin registration rolled back");
    }
}

impl Finalizable for AppContext {
    fn finalize(&self) {
        let detached = self.document.clear();
        info!(elements = detached, "App context finalized");
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("elements", &self.elements)
            .field("document", &self.document)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookhub_core::error::ErrorKind;
    use serde_json::Value;

    const CONFIG: &str = r#"
[[plugins.plugins]]
name = "myplugin"

[[plugins.plugins.hooks]]
endpoint = "toolbar"

[[plugins.plugins.hooks]]
endpoint = "toolbar"
module = "my-toolbar-item"
"#;

    #[tokio::test]
    async fn test_register_declared_plugins() {
        let ctx = AppContext::new(AppConfig::from_toml(CONFIG).unwrap());
        assert_eq!(ctx.register_declared_plugins().await.unwrap(), 2);

        let manager = ctx.plugins.hooks("myplugin").await.unwrap();
        assert_eq!(
            manager.hook_names(),
            vec!["myplugin-autogenerated-toolbar", "toolbar my-toolbar-item"]
        );
        assert_eq!(ctx.elements.names(), vec!["myplugin-autogenerated-toolbar"]);
    }

    #[tokio::test]
    async fn test_registering_twice_conflicts() {
        let ctx = AppContext::new(AppConfig::from_toml(CONFIG).unwrap());
        ctx.register_declared_plugins().await.unwrap();
        let err = ctx.register_declared_plugins().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_failed_registration_rolls_back() {
        let ctx = AppContext::new(AppConfig::from_toml(CONFIG).unwrap());
        ctx.plugins
            .register(Arc::new(StaticPlugin::new("late")))
            .await
            .unwrap();

        let config = AppConfig::from_toml(
            r#"
[[plugins.plugins]]
name = "early"

[[plugins.plugins]]
name = "late"
"#,
        )
        .unwrap();
        let ctx = AppContext {
            config: Arc::new(config),
            ..ctx
        };

        let err = ctx.register_declared_plugins().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(!ctx.plugins.contains("early").await);
        assert!(ctx.plugins.contains("late").await);
        assert_eq!(ctx.plugins.count().await, 1);
    }

    #[tokio::test]
    async fn test_reinjection_finalizes_previous() {
        let slot = AppContextSlot::new();
        assert_eq!(slot.get().unwrap_err().kind, ErrorKind::Uninitialized);

        let first = Arc::new(AppContext::new(AppConfig::from_toml(CONFIG).unwrap()));
        first.register_declared_plugins().await.unwrap();
        slot.inject(first.clone());

        let hook = first
            .plugins
            .hooks("myplugin")
            .await
            .unwrap()
            .get_dom_hook("toolbar", None);
        first.document.insert_endpoint("toolbar", Value::Null).await;
        assert_eq!(hook.attached_count(), 1);

        let second = Arc::new(AppContext::new(AppConfig::default()));
        slot.inject(second.clone());

        assert_eq!(hook.attached_count(), 0);
        assert_eq!(first.document.element_count(), 0);
        assert!(Arc::ptr_eq(&slot.get().unwrap(), &second));
    }
}
