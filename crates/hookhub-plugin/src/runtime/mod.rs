//! Attachment runtime.

pub mod document;

pub use document::Document;
