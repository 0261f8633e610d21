//! DOM hook system: per-plugin manager, hooks, and the plugin-facing handle.

pub mod dom_hook;
pub mod handle;
pub mod manager;

pub(crate) use dom_hook::AttachmentSink;
pub use dom_hook::{AttachCallback, DomHook, LastAttached};
pub use handle::HookHandle;
pub use manager::{DomHooksManager, hook_name};
