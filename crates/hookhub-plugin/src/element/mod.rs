//! Elements: instance handles, type schemas, and the type registry.

pub mod handle;
pub mod registry;
pub mod schema;

pub use handle::ElementHandle;
pub use registry::{ElementRegistry, ElementTypeRegistry};
pub use schema::{CONTENT_PROPERTY, ElementSchema, PLUGIN_PROPERTY, PropertyKind, PropertySpec};
