// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Sift.
//!
//! This crate provides the error type, the request/response data contract
//! shared by the classifier and the dispatcher, and the adapter traits that
//! inference backends implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SiftError;
pub use types::{
    GenerateOutput, GenerateRequest, HealthStatus, QueryResponse, SessionId, Settings,
    SimplifyThreshold,
};

pub use traits::{InferenceBackend, PluginAdapter};
