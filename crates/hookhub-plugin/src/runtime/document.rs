//! In-memory document: instantiates hook elements when an endpoint is
//! inserted and detaches them when it is removed.
//!
//! For every hook installed into an endpoint (across all registered
//! plugins) one element of the hook's module type is created, its `plugin`
//! and `content` properties are bound, and the hook is told about the
//! attachment. This is the only place outside tests that drives the
//! attach/detach side of a hook.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::element::{CONTENT_PROPERTY, ElementHandle, PLUGIN_PROPERTY};
use crate::hooks::{AttachmentSink, DomHook};
use crate::registry::PluginRegistry;

struct Mounted {
    endpoint: String,
    element: ElementHandle,
    hook: Arc<DomHook>,
}

/// The live set of endpoint elements.
pub struct Document {
    plugins: Arc<PluginRegistry>,
    mounted: Mutex<Vec<Mounted>>,
}

impl Document {
    /// Creates an empty document backed by `plugins`.
    pub fn new(plugins: Arc<PluginRegistry>) -> Self {
        Self {
            plugins,
            mounted: Mutex::new(Vec::new()),
        }
    }

    /// Inserts `endpoint`, attaching one element per hook installed into it.
    ///
    /// Returns the created elements in attachment order.
    pub async fn insert_endpoint(&self, endpoint: &str, content: Value) -> Vec<ElementHandle> {
        let mut created = Vec::new();

        for manager in self.plugins.managers().await {
            for hook in manager.hooks_for_endpoint(endpoint) {
                let element = ElementHandle::new(hook.module_name());
                element.set_property(PLUGIN_PROPERTY, json!({ "name": manager.plugin_name() }));
                element.set_property(CONTENT_PROPERTY, content.clone());
                created.push((element, hook));
            }
        }

        self.lock().extend(created.iter().map(|(element, hook)| Mounted {
            endpoint: endpoint.to_string(),
            element: element.clone(),
            hook: hook.clone(),
        }));

        info!(endpoint = %endpoint, elements = created.len(), "Endpoint inserted");

        created
            .into_iter()
            .map(|(element, hook)| {
                hook.handle_instance_attached(element.clone());
                element
            })
            .collect()
    }

    /// Removes one element. Returns `false` if it is not in the document.
    pub fn remove(&self, element: &ElementHandle) -> bool {
        let mounted = {
            let mut mounted = self.lock();
            match mounted.iter().position(|m| &m.element == element) {
                Some(index) => mounted.remove(index),
                None => return false,
            }
        };

        debug!(
            endpoint = %mounted.endpoint,
            element_id = %element.id(),
            "Element removed"
        );
        mounted.hook.handle_instance_detached(&mounted.element);
        true
    }

    /// Removes every element inserted for `endpoint`. Returns how many.
    pub fn remove_endpoint(&self, endpoint: &str) -> usize {
        let removed: Vec<Mounted> = {
            let mut mounted = self.lock();
            let (removed, kept): (Vec<Mounted>, Vec<Mounted>) =
                mounted.drain(..).partition(|m| m.endpoint == endpoint);
            *mounted = kept;
            removed
        };

        Self::detach(&removed);
        info!(endpoint = %endpoint, elements = removed.len(), "Endpoint removed");
        removed.len()
    }

    /// Removes every element. Returns how many.
    pub fn clear(&self) -> usize {
        let removed: Vec<Mounted> = self.lock().drain(..).collect();
        Self::detach(&removed);
        removed.len()
    }

    /// Returns the elements currently inserted for `endpoint`.
    pub fn elements_at(&self, endpoint: &str) -> Vec<ElementHandle> {
        self.lock()
            .iter()
            .filter(|m| m.endpoint == endpoint)
            .map(|m| m.element.clone())
            .collect()
    }

    /// Returns the number of live elements.
    pub fn element_count(&self) -> usize {
        self.lock().len()
    }

    fn detach(removed: &[Mounted]) {
        for m in removed.iter().rev() {
            m.hook.handle_instance_detached(&m.element);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Mounted>> {
        self.mounted.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.element_count())
            .finish()
    }
}
