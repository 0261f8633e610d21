//! A single DOM hook: one named extension point and the element instances
//! currently attached to it.
//!
//! Observers live in one ordered list holding two kinds of entries:
//!
//! - **durable** callbacks added through [`DomHook::on_attached`], invoked on
//!   every future attachment;
//! - at most one **waiter**, installed by [`DomHook::get_last_attached`] when
//!   nothing is attached yet. Every caller that arrives while the waiter is
//!   outstanding shares the same future. The first attachment resolves it and
//!   removes the waiter, so a later call starts a fresh wait.
//!
//! Attachment notifies a snapshot of the list taken after the instance is
//! recorded, in registration order, with the internal lock released. Removing
//! the waiter mid-notification therefore never skips or repeats a durable
//! callback, and callbacks may call back into the hook.

use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{self, BoxFuture, FutureExt, Shared};
use tokio::sync::oneshot;
use tracing::{debug, trace};

use crate::element::ElementHandle;

use super::handle::HookHandle;

/// Callback invoked with each newly attached instance.
pub type AttachCallback = Arc<dyn Fn(&ElementHandle) + Send + Sync>;

/// Future resolving to the most recently attached instance.
///
/// Cloneable; clones obtained during the same wait resolve to the same
/// instance. Never resolves if no instance is ever attached.
pub type LastAttached = Shared<BoxFuture<'static, ElementHandle>>;

/// Receives attach/detach events from the attachment runtime.
///
/// Crate-private: only the runtime can drive a hook, plugins get a
/// [`HookHandle`] and at most an `Arc<DomHook>` with no mutators in scope.
pub(crate) trait AttachmentSink: Send + Sync {
    /// Records `instance` as attached and notifies observers.
    fn handle_instance_attached(&self, instance: ElementHandle);

    /// Forgets `instance`. Unknown instances are ignored.
    fn handle_instance_detached(&self, instance: &ElementHandle);
}

#[derive(Clone)]
enum Observer {
    Durable(AttachCallback),
    Waiter(u64),
}

struct PendingWait {
    id: u64,
    sender: oneshot::Sender<ElementHandle>,
    future: LastAttached,
}

#[derive(Default)]
struct HookState {
    /// Attached instances, oldest first.
    instances: Vec<ElementHandle>,
    observers: Vec<Observer>,
    pending: Option<PendingWait>,
    next_wait_id: u64,
}

/// One extension point owned by a plugin.
///
/// Code outside this crate can observe a hook but never attach to it:
///
/// ```compile_fail
/// use std::sync::Arc;
/// use hookhub_plugin::element::ElementHandle;
/// use hookhub_plugin::hooks::DomHook;
///
/// let hook = Arc::new(DomHook::new("toolbar item", "toolbar", Some("item")));
/// hook.handle_instance_attached(ElementHandle::new("item"));
/// ```
pub struct DomHook {
    name: String,
    endpoint_name: String,
    module_name: String,
    placeholder: bool,
    state: Mutex<HookState>,
}

impl DomHook {
    /// Creates a hook. Without a module name the hook name doubles as the
    /// module name and the hook is marked as a placeholder.
    pub fn new(
        name: impl Into<String>,
        endpoint_name: impl Into<String>,
        module_name: Option<&str>,
    ) -> Self {
        let name = name.into();
        let module = module_name.filter(|m| !m.is_empty());
        Self {
            module_name: module.map(str::to_string).unwrap_or_else(|| name.clone()),
            placeholder: module.is_none(),
            endpoint_name: endpoint_name.into(),
            name,
            state: Mutex::new(HookState::default()),
        }
    }

    /// Returns the hook name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the endpoint this hook installs into.
    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    /// Name of the element type installed into the endpoint.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Returns whether the element type was synthesized for this hook.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Installs a callback invoked on every future attachment.
    ///
    /// Past attachments are not replayed.
    pub fn on_attached<F>(&self, callback: F) -> &Self
    where
        F: Fn(&ElementHandle) + Send + Sync + 'static,
    {
        self.lock()
            .observers
            .push(Observer::Durable(Arc::new(callback)));
        self
    }

    /// Returns the most recently attached instance, waiting for the next
    /// attachment when none is attached.
    pub fn get_last_attached(&self) -> LastAttached {
        let mut state = self.lock();

        if let Some(last) = state.instances.last() {
            return future::ready(last.clone()).boxed().shared();
        }

        if let Some(pending) = &state.pending {
            return pending.future.clone();
        }

        let (sender, receiver) = oneshot::channel();
        let shared = receiver
            .then(|received| async move {
                match received {
                    Ok(instance) => instance,
                    // The hook went away without attaching anything.
                    Err(_) => future::pending::<ElementHandle>().await,
                }
            })
            .boxed()
            .shared();

        let id = state.next_wait_id;
        state.next_wait_id += 1;
        state.observers.push(Observer::Waiter(id));
        state.pending = Some(PendingWait {
            id,
            sender,
            future: shared.clone(),
        });

        debug!(hook = %self.name, "Waiting for first attachment");
        shared
    }

    /// Returns the attached instances, oldest first.
    pub fn get_all_attached(&self) -> Vec<ElementHandle> {
        self.lock().instances.clone()
    }

    /// Returns the number of attached instances.
    pub fn attached_count(&self) -> usize {
        self.lock().instances.len()
    }

    /// Returns the number of installed observers, waiter included.
    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    /// Returns whether a `get_last_attached` wait is outstanding.
    pub fn is_waiting(&self) -> bool {
        self.lock().pending.is_some()
    }

    /// Returns the restricted view handed to plugin code.
    pub fn public_api(self: &Arc<Self>) -> HookHandle {
        HookHandle::new(Arc::clone(self))
    }

    fn resolve_wait(&self, id: u64, instance: &ElementHandle) {
        let pending = {
            let mut state = self.lock();
            match state.pending.take() {
                Some(pending) if pending.id == id => {
                    state
                        .observers
                        .retain(|o| !matches!(o, Observer::Waiter(w) if *w == id));
                    pending
                }
                other => {
                    state.pending = other;
                    return;
                }
            }
        };

        debug!(hook = %self.name, element_id = %instance.id(), "Resolving attachment wait");
        // Every waiter may have dropped its future; nothing to deliver then.
        let _ = pending.sender.send(instance.clone());
    }

    fn lock(&self) -> MutexGuard<'_, HookState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AttachmentSink for DomHook {
    fn handle_instance_attached(&self, instance: ElementHandle) {
        let observers = {
            let mut state = self.lock();
            // Re-attaching a live instance moves it to the tail.
            state.instances.retain(|i| i != &instance);
            state.instances.push(instance.clone());
            state.observers.clone()
        };

        debug!(
            hook = %self.name,
            element_id = %instance.id(),
            observers = observers.len(),
            "Instance attached"
        );

        for observer in observers {
            match observer {
                Observer::Durable(callback) => callback(&instance),
                Observer::Waiter(id) => self.resolve_wait(id, &instance),
            }
        }
    }

    fn handle_instance_detached(&self, instance: &ElementHandle) {
        let mut state = self.lock();
        match state.instances.iter().position(|i| i == instance) {
            Some(index) => {
                state.instances.remove(index);
                debug!(hook = %self.name, element_id = %instance.id(), "Instance detached");
            }
            None => {
                trace!(hook = %self.name, element_id = %instance.id(), "Detach of unknown instance ignored");
            }
        }
    }
}

impl std::fmt::Debug for DomHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomHook")
            .field("name", &self.name)
            .field("endpoint_name", &self.endpoint_name)
            .field("module_name", &self.module_name)
            .field("placeholder", &self.placeholder)
            .finish()
    }
}
