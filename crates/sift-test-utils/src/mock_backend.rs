// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock inference backend for deterministic testing.
//!
//! `MockBackend` implements `InferenceBackend` with pre-configured replies,
//! so dispatch and session tests run without an Ollama server.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sift_core::traits::{InferenceBackend, PluginAdapter};
use sift_core::types::{GenerateOutput, GenerateRequest, HealthStatus};
use sift_core::SiftError;

/// One scripted backend outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Successful generation with this raw text.
    Text(String),
    /// Transport failure (connection refused, timeout).
    Unreachable,
    /// Non-success HTTP status.
    Rejected(u16),
    /// 200 reply without a `response` field.
    Malformed,
}

/// A mock backend that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a default
/// "mock response" text is returned. Every request is recorded.
#[derive(Clone, Default)]
pub struct MockBackend {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    delay: Option<Duration>,
}

impl MockBackend {
    /// Create a mock backend with an empty reply queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock backend pre-loaded with successful text replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::with_replies(responses.into_iter().map(MockReply::Text).collect())
    }

    /// Create a mock backend pre-loaded with arbitrary outcomes.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::default()
        }
    }

    /// Delay every reply, to hold a request in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a reply to the end of the queue.
    pub async fn push_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of generate calls received.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Text("mock response".to_string()))
    }
}

#[async_trait]
impl PluginAdapter for MockBackend {
    fn name(&self) -> &str {
        "mock-backend"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, SiftError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateOutput, SiftError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply().await {
            MockReply::Text(text) => Ok(GenerateOutput {
                text,
                model: Some(model),
            }),
            MockReply::Unreachable => Err(SiftError::NetworkUnreachable {
                message: "connection refused (mock)".into(),
                source: None,
            }),
            MockReply::Rejected(status) => Err(SiftError::BackendRejected {
                status: Some(status),
                message: format!("backend returned {status} (mock)"),
            }),
            MockReply::Malformed => Err(SiftError::BackendRejected {
                status: Some(200),
                message: "generate payload has no `response` field (mock)".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::types::Settings;

    fn request(prompt: &str) -> GenerateRequest {
        GenerateRequest::new("mock-model", prompt, &Settings::default())
    }

    #[tokio::test]
    async fn replies_are_served_in_order_then_default() {
        let backend = MockBackend::with_replies(vec![
            MockReply::Text("first".into()),
            MockReply::Unreachable,
        ]);

        let first = backend.generate(request("a")).await.unwrap();
        assert_eq!(first.text, "first");
        assert!(matches!(
            backend.generate(request("b")).await,
            Err(SiftError::NetworkUnreachable { .. })
        ));
        assert_eq!(backend.generate(request("c")).await.unwrap().text, "mock response");

        let prompts: Vec<String> = backend.requests().await.into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let backend = MockBackend::new();
        let handle = backend.clone();
        backend.push_reply(MockReply::Rejected(503)).await;

        assert!(matches!(
            handle.generate(request("x")).await,
            Err(SiftError::BackendRejected { status: Some(503), .. })
        ));
        assert_eq!(backend.call_count().await, 1);
    }
}
