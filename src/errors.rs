//! Centralized error handling for goes-stac
//!
//! This module provides structured error types so that callers can tell a
//! malformed file name apart from a malformed file, with enough context to
//! point at the offending variable or attribute.

use thiserror::Error;

/// Main error type for goes-stac operations
#[derive(Error, Debug)]
pub enum GoesStacError {
    /// NetCDF file operation errors
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File name does not follow the ABI L2 naming convention
    #[error("invalid ABI L2 file name '{name}': {reason}")]
    FileName { name: String, reason: String },

    /// Variable not found in the netCDF file
    #[error("variable '{0}' not found in file")]
    MissingVariable(String),

    /// Required attribute not found
    #[error("attribute '{attribute}' not found on '{owner}'")]
    MissingAttribute { owner: String, attribute: String },

    /// Attribute present but not convertible to the expected type
    #[error("attribute '{attribute}' on '{owner}' has an unexpected type")]
    AttributeType { owner: String, attribute: String },

    /// Timestamp could not be parsed
    #[error("timestamp parse error: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// Projection parameters that cannot describe a valid grid
    #[error("invalid projection: {0}")]
    InvalidProjection(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for goes-stac operations
pub type Result<T> = std::result::Result<T, GoesStacError>;
