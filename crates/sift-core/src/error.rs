// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every Sift crate.

use thiserror::Error;

/// The primary error type used across Sift adapters and the dispatch pipeline.
#[derive(Debug, Error)]
pub enum SiftError {
    /// Configuration errors (invalid TOML, out-of-range settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// The inference backend could not be reached (connection refused, DNS, timeout).
    #[error("network unreachable: {message}")]
    NetworkUnreachable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered, but not with a usable generation
    /// (non-2xx status, or a payload without the generated text).
    #[error("backend rejected request: {message}")]
    BackendRejected {
        /// HTTP status when the rejection came from the status line.
        status: Option<u16>,
        message: String,
    },

    /// The caller supplied input the session refuses to dispatch.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A query is already awaiting a response in this session.
    #[error("a query is already awaiting a response")]
    SessionBusy,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SiftError {
    /// Returns true for failures that originate from the inference backend.
    ///
    /// These are the errors the dispatcher folds into its fallback reply.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            SiftError::NetworkUnreachable { .. } | SiftError::BackendRejected { .. }
        )
    }
}
