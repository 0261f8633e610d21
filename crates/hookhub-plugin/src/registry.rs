//! Plugin registry: stores registered plugins and the DOM hook manager
//! each one was given.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use hookhub_core::error::AppError;
use hookhub_core::result::AppResult;

use crate::element::ElementRegistry;
use crate::hooks::DomHooksManager;

/// Metadata about a registered plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
}

/// Trait that all plugins implement.
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns the plugin name. Autogenerated hook names are derived from it.
    fn name(&self) -> &str;

    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: self.name().to_string(),
            version: String::new(),
            description: String::new(),
        }
    }
}

/// A plugin known only by its metadata, as declared in configuration.
#[derive(Debug, Clone)]
pub struct StaticPlugin {
    info: PluginInfo,
}

impl StaticPlugin {
    /// Creates a plugin with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: PluginInfo {
                name: name.into(),
                version: String::new(),
                description: String::new(),
            },
        }
    }

    /// Sets the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }
}

impl Plugin for StaticPlugin {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn info(&self) -> PluginInfo {
        self.info.clone()
    }
}

/// Registry of all registered plugins.
#[derive(Debug)]
pub struct PluginRegistry {
    /// Plugin name → hook manager owned by that plugin.
    managers: RwLock<HashMap<String, Arc<DomHooksManager>>>,
    /// Plugin name → metadata.
    metadata: RwLock<HashMap<String, PluginInfo>>,
    /// Shared element type registry handed to every manager.
    elements: Arc<dyn ElementRegistry>,
}

impl PluginRegistry {
    /// Creates an empty plugin registry.
    pub fn new(elements: Arc<dyn ElementRegistry>) -> Self {
        Self {
            managers: RwLock::new(HashMap::new()),
            metadata: RwLock::new(HashMap::new()),
            elements,
        }
    }

    /// Registers a plugin and returns its hook manager.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> AppResult<Arc<DomHooksManager>> {
        let info = plugin.info();
        let name = info.name.clone();

        let mut managers = self.managers.write().await;
        let mut metadata = self.metadata.write().await;

        if managers.contains_key(&name) {
            return Err(AppError::conflict(format!(
                "Plugin '{}' is already registered",
                name
            )));
        }

        info!(plugin = %name, version = %info.version, "Registering plugin");

        let manager = Arc::new(DomHooksManager::new(plugin, self.elements.clone()));
        managers.insert(name.clone(), manager.clone());
        metadata.insert(name, info);

        Ok(manager)
    }

    /// Unregisters a plugin by name.
    ///
    /// Hooks already handed out keep working; they are just no longer
    /// reachable through the registry.
    pub async fn unregister(&self, name: &str) -> AppResult<Arc<DomHooksManager>> {
        let mut managers = self.managers.write().await;
        let mut metadata = self.metadata.write().await;

        let manager = managers
            .remove(name)
            .ok_or_else(|| AppError::not_found(format!("Plugin '{}' not found", name)))?;
        metadata.remove(name);

        info!(plugin = %name, "Plugin unregistered");

        Ok(manager)
    }

    /// Returns the hook manager of a registered plugin.
    pub async fn hooks(&self, name: &str) -> AppResult<Arc<DomHooksManager>> {
        let managers = self.managers.read().await;
        managers
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Plugin '{}' not found", name)))
    }

    /// Returns every hook manager, sorted by plugin name.
    pub async fn managers(&self) -> Vec<Arc<DomHooksManager>> {
        let managers = self.managers.read().await;
        let mut all: Vec<Arc<DomHooksManager>> = managers.values().cloned().collect();
        all.sort_by(|a, b| a.plugin_name().cmp(b.plugin_name()));
        all
    }

    /// Lists all registered plugin metadata, sorted by name.
    pub async fn list(&self) -> Vec<PluginInfo> {
        let metadata = self.metadata.read().await;
        let mut infos: Vec<PluginInfo> = metadata.values().cloned().collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Returns plugin count.
    pub async fn count(&self) -> usize {
        self.managers.read().await.len()
    }

    /// Checks whether a plugin is registered.
    pub async fn contains(&self, name: &str) -> bool {
        self.managers.read().await.contains_key(name)
    }
}
