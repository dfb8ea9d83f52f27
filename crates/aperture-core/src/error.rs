//! Error types for the avatar capture stack

use thiserror::Error;

/// Errors surfaced by the permission, capture, and persistence layers
#[derive(Error, Debug)]
pub enum ApertureError {
    // Permission errors
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("Permission query failed: {0}")]
    PermissionQueryFailed(String),

    // Capture errors
    #[error("No live device handle")]
    NoDeviceHandle,

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Capture session already closed")]
    SessionClosed,

    // Persistence errors
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

/// Result type for avatar workflow operations
pub type ApertureResult<T> = Result<T, ApertureError>;
