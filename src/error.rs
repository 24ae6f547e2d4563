//! Error types for the canvas engine
//!
//! Gestures never fail; these cover configuration, persistence and
//! document operations that name something that does not exist.

use thiserror::Error;

use crate::document::ObjectId;

/// Errors that can occur outside of pointer handling
#[derive(Error, Debug)]
pub enum CanvasError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transform with a non-positive or non-finite scale
    #[error("Invalid transform scale: {0}")]
    InvalidScale(f64),

    /// Configuration value out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Object id not present in the document
    #[error("Unknown object: {0}")]
    UnknownObject(ObjectId),

    /// Port name not declared on the object
    #[error("Object {object} has no port named {port:?}")]
    UnknownPort { object: ObjectId, port: String },
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
