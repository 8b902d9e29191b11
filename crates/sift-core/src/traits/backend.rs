// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inference backend trait for locally hosted text-generation services.

use async_trait::async_trait;

use crate::error::SiftError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{GenerateOutput, GenerateRequest};

/// Adapter for a text-generation endpoint.
///
/// Implementations issue exactly one request per call and return the full
/// generated text. Connection failures must surface as
/// [`SiftError::NetworkUnreachable`]; non-success statuses and payloads
/// without generated text as [`SiftError::BackendRejected`].
#[async_trait]
pub trait InferenceBackend: PluginAdapter {
    /// Sends a non-streaming generation request.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateOutput, SiftError>;
}
