//! Error types for Enclave operations.
//!
//! Containment violations are reported as
//! [`Diagnostic`](enclave_core::diagnostic::Diagnostic) values and never show
//! up here. [`EnclaveError`] only covers the fallible edges around the
//! pipeline: reading documents, (de)serializing them, and configuration.

use std::io;

use thiserror::Error;

/// The main error type for Enclave operations.
#[derive(Debug, Error)]
pub enum EnclaveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
