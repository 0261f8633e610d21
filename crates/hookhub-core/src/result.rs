//! Convenience result type alias for hookhub.

use crate::error::AppError;

/// A specialized `Result` type for hookhub operations.
pub type AppResult<T> = Result<T, AppError>;
