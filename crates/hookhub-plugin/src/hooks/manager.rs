//! Per-plugin DOM hook manager. Plugins request hooks by endpoint name and
//! get the same hook back for the same request.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{info, warn};

use crate::element::{ElementRegistry, ElementSchema};
use crate::registry::Plugin;

use super::dom_hook::DomHook;
use super::handle::HookHandle;

/// Computes the hook name for an endpoint request.
///
/// With a module name: `"<endpoint> <module>"`. Without one:
/// `"<plugin>-autogenerated-<endpoint>"`.
pub fn hook_name(plugin_name: &str, endpoint_name: &str, module_name: Option<&str>) -> String {
    match module_name.filter(|m| !m.is_empty()) {
        Some(module) => format!("{} {}", endpoint_name, module),
        None => format!("{}-autogenerated-{}", plugin_name, endpoint_name),
    }
}

/// Lazily creates and caches the hooks of one plugin.
#[derive(Debug)]
pub struct DomHooksManager {
    /// Owning plugin, used to derive autogenerated names.
    plugin: Arc<dyn Plugin>,
    /// Hook name → hook. Entries are never removed.
    hooks: DashMap<String, Arc<DomHook>>,
    /// Where placeholder element types are registered.
    elements: Arc<dyn ElementRegistry>,
}

impl DomHooksManager {
    /// Creates a manager for `plugin`.
    pub fn new(plugin: Arc<dyn Plugin>, elements: Arc<dyn ElementRegistry>) -> Self {
        Self {
            plugin,
            hooks: DashMap::new(),
            elements,
        }
    }

    /// Returns the owning plugin's name.
    pub fn plugin_name(&self) -> &str {
        self.plugin.name()
    }

    /// Returns the hook for `endpoint_name` / `module_name`, creating it on
    /// first request.
    ///
    /// A hook created without a module name gets a placeholder element type
    /// registered under its hook name.
    pub fn get_dom_hook(&self, endpoint_name: &str, module_name: Option<&str>) -> Arc<DomHook> {
        let name = hook_name(self.plugin.name(), endpoint_name, module_name);

        if let Some(hook) = self.hooks.get(&name) {
            return hook.clone();
        }

        let mut created = false;
        let hook = self
            .hooks
            .entry(name.clone())
            .or_insert_with(|| {
                created = true;
                Arc::new(DomHook::new(name.clone(), endpoint_name, module_name))
            })
            .clone();

        if created {
            info!(
                plugin = %self.plugin.name(),
                hook = %name,
                endpoint = %endpoint_name,
                module = %hook.module_name(),
                "DOM hook created"
            );
            if hook.is_placeholder() {
                self.register_placeholder(&hook);
            }
        }

        hook
    }

    /// Same as [`get_dom_hook`](Self::get_dom_hook), returning the view handed
    /// to plugin code.
    pub fn get_dom_hook_api(&self, endpoint_name: &str, module_name: Option<&str>) -> HookHandle {
        self.get_dom_hook(endpoint_name, module_name).public_api()
    }

    /// Returns every hook installed into `endpoint_name`, sorted by hook name.
    pub fn hooks_for_endpoint(&self, endpoint_name: &str) -> Vec<Arc<DomHook>> {
        let mut hooks: Vec<Arc<DomHook>> = self
            .hooks
            .iter()
            .filter(|e| e.value().endpoint_name() == endpoint_name)
            .map(|e| e.value().clone())
            .collect();
        hooks.sort_by(|a, b| a.name().cmp(b.name()));
        hooks
    }

    /// Returns all hooks, sorted by hook name.
    pub fn hooks(&self) -> Vec<Arc<DomHook>> {
        let mut hooks: Vec<Arc<DomHook>> = self.hooks.iter().map(|e| e.value().clone()).collect();
        hooks.sort_by(|a, b| a.name().cmp(b.name()));
        hooks
    }

    /// Returns all hook names, sorted.
    pub fn hook_names(&self) -> Vec<String> {
        self.hooks().iter().map(|h| h.name().to_string()).collect()
    }

    /// Returns the number of hooks created so far.
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    fn register_placeholder(&self, hook: &DomHook) {
        if let Err(e) = self
            .elements
            .register_element_type(hook.name(), ElementSchema::placeholder())
        {
            warn!(
                hook = %hook.name(),
                error = %e,
                "Placeholder element type not registered"
            );
        }
    }
}
