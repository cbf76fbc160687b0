//! Error types for schemata.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`SchemataError`] - Top-level error type for all schemata operations
//! - [`RouterBuildError`] - Errors while registering routes with a router or transport
//! - [`EncodeError`] - Errors while encoding a response body

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all schemata operations.
#[derive(Error, Debug)]
pub enum SchemataError {
    /// A route could not be registered.
    #[error("router build error: {0}")]
    Build(#[from] RouterBuildError),

    /// A value could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// The transport failed while serving.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur while building a router.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterBuildError {
    /// A route with the same method and pattern was already registered.
    #[error("duplicate route: {0}")]
    DuplicateRoute(String),

    /// The pattern was rejected by the router backend.
    #[error("invalid pattern {pattern}: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Backend-specific reason.
        reason: String,
    },
}

/// Error returned when a response body cannot be encoded as JSON.
#[derive(Error, Debug)]
#[error("failed to encode json: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

impl From<BoxError> for SchemataError {
    fn from(err: BoxError) -> Self {
        SchemataError::Custom(err)
    }
}
