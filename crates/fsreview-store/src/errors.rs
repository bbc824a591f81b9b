//! Error handling for fsreview-store
//!
//! Wraps fsreview-core ExError with store-specific helpers

use fsreview_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error.
///
/// A missing file maps to `NotFound` so callers can tell it apart from other
/// I/O failures.
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    let kind = match err.kind() {
        std::io::ErrorKind::NotFound => ExErrorKind::NotFound,
        _ => ExErrorKind::Io,
    };
    ExError::new(kind)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Attach the artifact path to a codec error
pub fn decode_error(operation: &str, path: &Path, err: ExError) -> ExError {
    err.with_op(operation.to_string())
        .with_path(path.display().to_string())
}

/// Create a persistence error wrapping the underlying cause
pub fn persistence_error(operation: &str, path: &Path, cause: ExError) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(format!("failed to persist {}", path.display()))
        .with_source(cause)
}

/// Create a walk schema version error
pub fn unsupported_walk(path: &Path, version: u32) -> ExError {
    ExError::new(ExErrorKind::Decode)
        .with_op("read_walk")
        .with_path(path.display().to_string())
        .with_message(format!("Unsupported walk version {}", version))
}
