//! Plugin API: the context exposed to plugin code.

pub mod context;

pub use context::{AppContext, AppContextSlot};
