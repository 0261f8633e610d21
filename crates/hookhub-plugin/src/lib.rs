//! # hookhub-plugin
//!
//! Plugin hook system for hookhub. Provides:
//!
//! - Per-plugin DOM hook managers with name-based hook lookup
//! - Hooks tracking attached element instances and notifying observers
//! - A restricted hook handle for plugin code
//! - Element type registration for autogenerated placeholder types
//! - An in-memory document that attaches and detaches hook elements
//! - The application context handed to plugins

pub mod api;
pub mod element;
pub mod hooks;
pub mod prelude;
pub mod registry;
pub mod runtime;

pub use api::context::{AppContext, AppContextSlot};
pub use element::{ElementHandle, ElementTypeRegistry};
pub use hooks::{DomHook, DomHooksManager, HookHandle};
pub use registry::PluginRegistry;
pub use runtime::Document;
