//! Prelude for convenient imports.

pub use crate::api::context::{AppContext, AppContextSlot};
pub use crate::element::{ElementHandle, ElementSchema, PropertyKind};
pub use crate::hooks::{AttachCallback, HookHandle, LastAttached};
pub use crate::registry::{Plugin, PluginInfo, StaticPlugin};

pub use hookhub_core::context::Finalizable;
