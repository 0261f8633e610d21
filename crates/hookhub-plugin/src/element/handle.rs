//! Element handles: the instances attached at an extension point.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::Value;

use hookhub_core::types::ElementId;

/// A live element created by the attachment runtime.
///
/// Cloning is cheap and yields the same element: equality and hashing go
/// through the [`ElementId`], so the handle passed to detach matches the
/// one passed to attach.
#[derive(Clone)]
pub struct ElementHandle {
    inner: Arc<ElementInner>,
}

struct ElementInner {
    id: ElementId,
    type_name: String,
    created_at: DateTime<Utc>,
    properties: Mutex<HashMap<String, Value>>,
}

impl ElementHandle {
    /// Creates a new element of the given type with no bound properties.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ElementInner {
                id: ElementId::new(),
                type_name: type_name.into(),
                created_at: Utc::now(),
                properties: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Returns the element identity.
    pub fn id(&self) -> ElementId {
        self.inner.id
    }

    /// Returns the element type name.
    pub fn type_name(&self) -> &str {
        &self.inner.type_name
    }

    /// Returns when the element was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Binds a property value.
    pub fn set_property(&self, name: &str, value: Value) {
        self.lock_properties().insert(name.to_string(), value);
    }

    /// Returns a bound property value.
    pub fn property(&self, name: &str) -> Option<Value> {
        self.lock_properties().get(name).cloned()
    }

    /// Returns a snapshot of all bound properties.
    pub fn properties(&self) -> HashMap<String, Value> {
        self.lock_properties().clone()
    }

    fn lock_properties(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.inner
            .properties
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl PartialEq for ElementHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for ElementHandle {}

impl Hash for ElementHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl std::fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementHandle")
            .field("id", &self.inner.id)
            .field("type_name", &self.inner.type_name)
            .finish()
    }
}
