// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ollama generate and tags endpoints.
//!
//! Provides [`OllamaClient`], which maps every failure onto the two backend
//! error kinds the dispatcher recovers from: transport failures become
//! `NetworkUnreachable`, everything else `BackendRejected`.

use std::time::Duration;

use sift_config::model::BackendConfig;
use sift_core::SiftError;
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateApiRequest, GenerateApiResponse, TagsResponse};

/// Path listing installed models.
const TAGS_PATH: &str = "/api/tags";

/// HTTP client for a single Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    generate_url: String,
}

impl OllamaClient {
    /// Creates a client for the backend described by `config`.
    pub fn new(config: &BackendConfig) -> Result<Self, SiftError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SiftError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            generate_url: config.generate_url(),
        })
    }

    /// Full URL generation requests are posted to.
    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }

    /// Sends one non-streaming generation request.
    ///
    /// Returns the generated text. A payload without a `response` field is
    /// treated as a rejection.
    pub async fn generate(&self, request: &GenerateApiRequest) -> Result<GenerateApiResponse, SiftError> {
        let response = self
            .client
            .post(&self.generate_url)
            .json(request)
            .send()
            .await
            .map_err(|e| unreachable_error(&self.generate_url, e))?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "generate response received");

        let body = response
            .text()
            .await
            .map_err(|e| unreachable_error(&self.generate_url, e))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(SiftError::BackendRejected {
                status: Some(status.as_u16()),
                message: format!("backend returned {status}: {detail}"),
            });
        }

        let parsed: GenerateApiResponse =
            serde_json::from_str(&body).map_err(|e| SiftError::BackendRejected {
                status: Some(status.as_u16()),
                message: format!("malformed generate payload: {e}"),
            })?;

        if parsed.response.is_none() {
            let message = match &parsed.error {
                Some(err) => format!("backend reported an error: {err}"),
                None => "generate payload has no `response` field".to_string(),
            };
            return Err(SiftError::BackendRejected {
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(parsed)
    }

    /// Lists the names of installed models.
    pub async fn list_models(&self) -> Result<Vec<String>, SiftError> {
        let url = format!("{}{TAGS_PATH}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unreachable_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiftError::BackendRejected {
                status: Some(status.as_u16()),
                message: format!("model listing returned {status}"),
            });
        }

        let tags: TagsResponse = response.json().await.map_err(|e| SiftError::BackendRejected {
            status: Some(status.as_u16()),
            message: format!("malformed model listing: {e}"),
        })?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

fn unreachable_error(url: &str, e: reqwest::Error) -> SiftError {
    let reason = if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    SiftError::NetworkUnreachable {
        message: format!("{reason} for {url}: {e}"),
        source: Some(Box::new(e)),
    }
}
