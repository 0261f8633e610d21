//! Plugin declarations.

use serde::{Deserialize, Serialize};

/// Plugin system configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugins to register at startup.
    #[serde(default)]
    pub plugins: Vec<PluginDeclaration>,
}

/// One plugin and the extension points it hooks into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDeclaration {
    /// Plugin name, used to derive autogenerated hook names.
    pub name: String,
    /// Hooks the plugin requests.
    #[serde(default)]
    pub hooks: Vec<HookDeclaration>,
}

/// A request for a hook at an endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookDeclaration {
    /// Endpoint (extension point) name.
    pub endpoint: String,
    /// Element type to install. When absent a placeholder type is generated.
    #[serde(default)]
    pub module: Option<String>,
}
