// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a dispatcher and a chat session over a
//! [`MockBackend`], configured the same way the binary configures them.

use std::sync::Arc;
use std::time::Duration;

use sift_agent::{ChatSession, Dispatcher};
use sift_config::model::{OutputConfig, RoutingConfig, SiftConfig};
use sift_core::{QueryResponse, Settings, SiftError};

use crate::mock_backend::{MockBackend, MockReply};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<MockReply>,
    routing: Option<RoutingConfig>,
    output: Option<OutputConfig>,
    delay: Option<Duration>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            routing: None,
            output: None,
            delay: None,
        }
    }

    /// Queue successful backend replies.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.replies.extend(responses.into_iter().map(MockReply::Text));
        self
    }

    /// Queue arbitrary backend outcomes, failures included.
    pub fn with_mock_replies(mut self, replies: Vec<MockReply>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Replace the `[routing]` section.
    pub fn with_routing(mut self, routing: RoutingConfig) -> Self {
        self.routing = Some(routing);
        self
    }

    /// Replace the `[output]` section.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = Some(output);
        self
    }

    /// Delay every backend reply.
    pub fn with_backend_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Build the test harness.
    pub fn build(self) -> Result<TestHarness, SiftError> {
        let config = SiftConfig {
            routing: self.routing.unwrap_or_default(),
            output: self.output.unwrap_or_default(),
            ..SiftConfig::default()
        };

        let mut mock_backend = MockBackend::with_replies(self.replies);
        if let Some(delay) = self.delay {
            mock_backend = mock_backend.with_delay(delay);
        }

        let dispatcher = Arc::new(Dispatcher::from_config(
            &config,
            Arc::new(mock_backend.clone()),
        )?);
        let session = Arc::new(ChatSession::new(Arc::clone(&dispatcher)));

        Ok(TestHarness {
            mock_backend,
            dispatcher,
            session,
            config,
        })
    }
}

/// A complete test environment over a mock backend.
pub struct TestHarness {
    /// The mock backend; shares its queue and request log with the dispatcher's copy.
    pub mock_backend: MockBackend,
    pub dispatcher: Arc<Dispatcher>,
    pub session: Arc<ChatSession>,
    /// Configuration the harness was assembled from.
    pub config: SiftConfig,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Submit `text` with the configured default settings.
    pub async fn send_message(&self, text: &str) -> Result<QueryResponse, SiftError> {
        let settings = self.config.defaults.to_settings();
        self.session.submit_query(text, &settings).await
    }

    /// Submit `text` with explicit settings.
    pub async fn send_with(
        &self,
        text: &str,
        settings: &Settings,
    ) -> Result<QueryResponse, SiftError> {
        self.session.submit_query(text, settings).await
    }
}
