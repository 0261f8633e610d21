//! Element type schemas.

use serde::{Deserialize, Serialize};

/// Property name through which the runtime binds the owning plugin.
pub const PLUGIN_PROPERTY: &str = "plugin";

/// Property name through which the runtime binds the endpoint content.
pub const CONTENT_PROPERTY: &str = "content";

/// Kind of value a bindable property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// Arbitrary JSON object.
    Object,
    /// String value.
    String,
    /// Numeric value.
    Number,
    /// Boolean value.
    Boolean,
}

/// A single bindable property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Property name.
    pub name: String,
    /// Property kind.
    pub kind: PropertyKind,
}

/// The set of properties an element type exposes to the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSchema {
    /// Declared properties, in declaration order.
    pub properties: Vec<PropertySpec>,
}

impl ElementSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property.
    pub fn with_property(mut self, name: &str, kind: PropertyKind) -> Self {
        self.properties.push(PropertySpec {
            name: name.to_string(),
            kind,
        });
        self
    }

    /// Schema of a synthesized placeholder element: `plugin` and `content`.
    pub fn placeholder() -> Self {
        Self::new()
            .with_property(PLUGIN_PROPERTY, PropertyKind::Object)
            .with_property(CONTENT_PROPERTY, PropertyKind::Object)
    }

    /// Returns whether the schema declares `name`.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }
}
