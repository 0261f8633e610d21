//! Element type registry: the seam through which placeholder element types
//! are made known to the rendering side.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::info;

use hookhub_core::error::AppError;
use hookhub_core::result::AppResult;

use super::schema::ElementSchema;

/// Registers element types by name.
pub trait ElementRegistry: Send + Sync + std::fmt::Debug {
    /// Registers `schema` under `name`.
    fn register_element_type(&self, name: &str, schema: ElementSchema) -> AppResult<()>;

    /// Returns whether `name` is registered.
    fn is_registered(&self, name: &str) -> bool;
}

/// In-memory element type registry.
#[derive(Debug, Default)]
pub struct ElementTypeRegistry {
    /// Type name → schema.
    types: DashMap<String, ElementSchema>,
}

impl ElementTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
        }
    }

    /// Returns the schema registered under `name`.
    pub fn get(&self, name: &str) -> Option<ElementSchema> {
        self.types.get(name).map(|s| s.clone())
    }

    /// Returns all registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Returns the number of registered types.
    pub fn count(&self) -> usize {
        self.types.len()
    }
}

impl ElementRegistry for ElementTypeRegistry {
    fn register_element_type(&self, name: &str, schema: ElementSchema) -> AppResult<()> {
        match self.types.entry(name.to_string()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Element type '{}' is already registered",
                name
            ))),
            Entry::Vacant(slot) => {
                info!(
                    element_type = %name,
                    properties = schema.properties.len(),
                    "Element type registered"
                );
                slot.insert(schema);
                Ok(())
            }
        }
    }

    fn is_registered(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}
