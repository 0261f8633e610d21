//! Plugin-facing hook handle.

use std::sync::Arc;

use crate::element::ElementHandle;

use super::dom_hook::{DomHook, LastAttached};

/// Restricted view of a [`DomHook`].
///
/// Exposes observation only. The attach/detach mutators live on a
/// crate-private trait driven by the document runtime.
#[derive(Clone)]
pub struct HookHandle {
    hook: Arc<DomHook>,
}

impl HookHandle {
    pub(crate) fn new(hook: Arc<DomHook>) -> Self {
        Self { hook }
    }

    /// Installs a callback invoked on every future attachment.
    pub fn on_attached<F>(&self, callback: F) -> &Self
    where
        F: Fn(&ElementHandle) + Send + Sync + 'static,
    {
        self.hook.on_attached(callback);
        self
    }

    /// Returns the most recently attached instance, waiting if none is.
    pub fn get_last_attached(&self) -> LastAttached {
        self.hook.get_last_attached()
    }

    /// Returns the attached instances, oldest first.
    pub fn get_all_attached(&self) -> Vec<ElementHandle> {
        self.hook.get_all_attached()
    }

    /// Name of the element type installed into the endpoint.
    pub fn module_name(&self) -> &str {
        self.hook.module_name()
    }

    /// Returns whether both handles observe the same hook.
    pub fn same_hook(&self, other: &HookHandle) -> bool {
        Arc::ptr_eq(&self.hook, &other.hook)
    }
}

impl std::fmt::Debug for HookHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookHandle")
            .field("hook", &self.hook.name())
            .field("module_name", &self.hook.module_name())
            .finish()
    }
}
