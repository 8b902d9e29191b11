// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama inference backend for Sift.
//!
//! This crate implements [`InferenceBackend`] over Ollama's non-streaming
//! `/api/generate` endpoint, plus a health check against `/api/tags`.

pub mod client;
pub mod types;

use async_trait::async_trait;
use sift_config::model::BackendConfig;
use sift_core::error::SiftError;
use sift_core::traits::{InferenceBackend, PluginAdapter};
use sift_core::types::{GenerateOutput, GenerateRequest, HealthStatus};
use tracing::{debug, info};

use crate::client::OllamaClient;
use crate::types::GenerateApiRequest;

/// Ollama backend implementing [`InferenceBackend`].
pub struct OllamaBackend {
    client: OllamaClient,
    model: String,
}

impl OllamaBackend {
    /// Creates a backend from the `[backend]` configuration section.
    pub fn new(config: &BackendConfig) -> Result<Self, SiftError> {
        let client = OllamaClient::new(config)?;
        info!(
            url = client.generate_url(),
            model = config.model,
            "Ollama backend initialized"
        );
        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    /// The model named in configuration.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_api_request(request: GenerateRequest) -> GenerateApiRequest {
        GenerateApiRequest {
            model: request.model,
            prompt: request.prompt,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        }
    }
}

/// Whether `installed` names the same model as `wanted`.
///
/// Ollama lists untagged pulls as `name:latest`.
fn model_matches(installed: &str, wanted: &str) -> bool {
    installed == wanted
        || (!wanted.contains(':') && installed.strip_suffix(":latest") == Some(wanted))
}

#[async_trait]
impl PluginAdapter for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, SiftError> {
        match self.client.list_models().await {
            Ok(models) if models.iter().any(|m| model_matches(m, &self.model)) => {
                Ok(HealthStatus::Healthy)
            }
            Ok(_) => Ok(HealthStatus::Degraded(format!(
                "model `{}` is not installed",
                self.model
            ))),
            Err(e) if e.is_backend_failure() => Ok(HealthStatus::Unhealthy(e.to_string())),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl InferenceBackend for OllamaBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateOutput, SiftError> {
        let api_request = Self::to_api_request(request);
        let reply = self.client.generate(&api_request).await?;
        let text = reply.response.ok_or_else(|| SiftError::BackendRejected {
            status: None,
            message: "generate payload has no `response` field".into(),
        })?;
        debug!(chars = text.len(), "generation complete");
        Ok(GenerateOutput {
            text,
            model: reply.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::types::Settings;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> OllamaBackend {
        OllamaBackend::new(&BackendConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            ..BackendConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn model_match_handles_latest_suffix() {
        assert!(model_matches("llama3:latest", "llama3"));
        assert!(model_matches("deepseek-r1:7b", "deepseek-r1:7b"));
        assert!(!model_matches("deepseek-r1:14b", "deepseek-r1:7b"));
        assert!(!model_matches("llama3:8b", "llama3"));
    }

    #[tokio::test]
    async fn generate_returns_raw_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "deepseek-r1:7b",
                "response": "<think>hmm</think>Use `du -sh`.",
                "done": true
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let request = GenerateRequest::new("deepseek-r1:7b", "disk usage per folder", &Settings::default());
        let output = backend.generate(request).await.unwrap();
        // Reasoning markup is the dispatcher's concern, not the adapter's.
        assert_eq!(output.text, "<think>hmm</think>Use `du -sh`.");
        assert_eq!(output.model.as_deref(), Some("deepseek-r1:7b"));
    }

    #[tokio::test]
    async fn health_check_reports_installed_model() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{"name": "deepseek-r1:7b"}]
            })))
            .mount(&server)
            .await;

        let status = backend_for(&server).health_check().await.unwrap();
        assert_eq!(status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_degraded_when_model_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{"name": "llama3:latest"}]
            })))
            .mount(&server)
            .await;

        let status = backend_for(&server).health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Degraded(msg) if msg.contains("deepseek-r1:7b")));
    }

    #[tokio::test]
    async fn health_check_unhealthy_when_unreachable() {
        let backend = OllamaBackend::new(&BackendConfig {
            base_url: sift_test_utils::closed_port_url().unwrap(),
            timeout_secs: 5,
            ..BackendConfig::default()
        })
        .unwrap();

        let status = backend.health_check().await.unwrap();
        assert!(
            matches!(&status, HealthStatus::Unhealthy(msg) if msg.starts_with("network unreachable")),
            "got {status:?}"
        );
    }

    #[test]
    fn adapter_identity() {
        let backend = OllamaBackend::new(&BackendConfig::default()).unwrap();
        assert_eq!(backend.name(), "ollama");
        assert_eq!(backend.model(), "deepseek-r1:7b");
        assert_eq!(backend.version().major, 0);
    }
}
