//! # hookhub-core
//!
//! Core crate for hookhub. Contains configuration schemas, typed
//! identifiers, the process-scoped context slot, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other hookhub crates.

pub mod config;
pub mod context;
pub mod error;
pub mod result;
pub mod types;

pub use context::{ContextSlot, Finalizable};
pub use error::AppError;
pub use result::AppResult;
