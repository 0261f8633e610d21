//! Core type definitions used across the hookhub workspace.

pub mod id;

pub use id::*;
