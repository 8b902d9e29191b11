// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query dispatch: classify, then answer locally or forward to the backend.

use std::sync::Arc;

use sift_config::model::SiftConfig;
use sift_core::{GenerateRequest, InferenceBackend, QueryResponse, Settings, SiftError};
use sift_router::{QueryClassifier, QueryHistory, RoutingDecision};
use tracing::{debug, info, warn};

use crate::postprocess::ReasoningFilter;

/// Reply used whenever the backend cannot produce an answer.
pub const FALLBACK_MESSAGE: &str = "Sorry, I couldn't get an answer from the language model. Please check that the local model server is running and the model is loaded.";

/// Turns one query into one [`QueryResponse`].
///
/// Short-circuit decisions are answered from canned text with no I/O.
/// Forwarded queries cost exactly one backend call; any backend failure is
/// logged and replaced by [`FALLBACK_MESSAGE`].
pub struct Dispatcher {
    classifier: QueryClassifier,
    backend: Arc<dyn InferenceBackend>,
    model: String,
    filter: ReasoningFilter,
}

impl Dispatcher {
    pub fn new(
        classifier: QueryClassifier,
        backend: Arc<dyn InferenceBackend>,
        model: impl Into<String>,
        filter: ReasoningFilter,
    ) -> Self {
        Self {
            classifier,
            backend,
            model: model.into(),
            filter,
        }
    }

    /// Assembles a dispatcher from the loaded configuration.
    pub fn from_config(
        config: &SiftConfig,
        backend: Arc<dyn InferenceBackend>,
    ) -> Result<Self, SiftError> {
        let filter = ReasoningFilter::from_config(&config.output)?;
        info!(
            backend = backend.name(),
            model = config.backend.model,
            "dispatcher ready"
        );
        Ok(Self::new(
            QueryClassifier::from_config(&config.routing),
            backend,
            config.backend.model.clone(),
            filter,
        ))
    }

    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Answers `query` for the session owning `history`.
    ///
    /// Never fails: backend errors become the fallback reply.
    pub async fn handle(
        &self,
        query: &str,
        history: &mut QueryHistory,
        settings: &Settings,
    ) -> QueryResponse {
        let decision = self.route(query, history, settings);
        self.answer(decision).await
    }

    /// Classifies `query`, recording it into `history`. No I/O.
    pub fn route(
        &self,
        query: &str,
        history: &mut QueryHistory,
        settings: &Settings,
    ) -> RoutingDecision {
        let decision = self.classifier.classify(query, history, settings);
        debug!(decision = decision.kind(), "query classified");
        decision
    }

    /// Produces the reply for an already classified query.
    ///
    /// Only [`RoutingDecision::Forward`] touches the backend.
    pub async fn answer(&self, decision: RoutingDecision) -> QueryResponse {
        match decision {
            RoutingDecision::Forward { query, settings } => {
                match self.forward(&query, &settings).await {
                    Ok(text) => QueryResponse::text(text),
                    Err(e) => {
                        warn!(error = %e, "backend call failed, returning fallback reply");
                        QueryResponse::text(FALLBACK_MESSAGE)
                    }
                }
            }
            other => other
                .canned_response()
                .unwrap_or_else(|| QueryResponse::text(FALLBACK_MESSAGE)),
        }
    }

    /// Sends `query` to the backend and returns the cleaned answer.
    pub async fn forward(&self, query: &str, settings: &Settings) -> Result<String, SiftError> {
        let request = GenerateRequest::new(&self.model, query, settings);
        let output = self.backend.generate(request).await?;
        let cleaned = self.filter.clean(&output.text);
        debug!(
            raw_chars = output.text.len(),
            chars = cleaned.len(),
            "backend answer post-processed"
        );
        Ok(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_config::model::ReasoningMode;
    use sift_core::SimplifyThreshold;
    use sift_router::decision::{OFF_TOPIC_MESSAGE, REPEATED_MESSAGE};
    use sift_test_utils::{MockBackend, MockReply};

    fn dispatcher_with(backend: MockBackend) -> Dispatcher {
        Dispatcher::new(
            QueryClassifier::new(),
            Arc::new(backend),
            "deepseek-r1:7b",
            ReasoningFilter::new("think", ReasoningMode::Tags).unwrap(),
        )
    }

    const LONG_QUERY: &str = "my rust build takes four minutes after touching a single file";

    #[tokio::test]
    async fn canned_decisions_make_no_backend_call() {
        let backend = MockBackend::new();
        let dispatcher = dispatcher_with(backend.clone());
        let mut history = QueryHistory::new();
        let settings = Settings::default();

        let refused = dispatcher
            .handle("any good movie tonight", &mut history, &settings)
            .await;
        assert_eq!(refused.content(), OFF_TOPIC_MESSAGE);

        let help = dispatcher.handle("grep", &mut history, &settings).await;
        assert_eq!(help.content(), "Check the manual with: man grep");

        let redirect = dispatcher.handle("what is TCP", &mut history, &settings).await;
        assert!(redirect.is_redirect());
        assert_eq!(
            redirect.redirect_url(),
            Some("https://letmegooglethat.com/?q=what%20is%20TCP")
        );

        assert_eq!(backend.call_count().await, 0);
    }

    #[tokio::test]
    async fn forwarded_query_is_sent_verbatim_with_settings() {
        let backend = MockBackend::with_responses(vec!["<think>hm</think>\n Enable sccache. ".into()]);
        let dispatcher = dispatcher_with(backend.clone());
        let mut history = QueryHistory::new();
        let settings = Settings::new(0.3, 128, SimplifyThreshold::High).unwrap();

        let response = dispatcher.handle(LONG_QUERY, &mut history, &settings).await;
        assert_eq!(response.content(), "hm\n Enable sccache.");
        assert!(!response.is_redirect());

        let requests = backend.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, LONG_QUERY);
        assert_eq!(requests[0].model, "deepseek-r1:7b");
        assert_eq!(requests[0].temperature, 0.3);
        assert_eq!(requests[0].max_tokens, 128);
    }

    #[tokio::test]
    async fn every_backend_failure_becomes_the_fallback() {
        for reply in [
            MockReply::Unreachable,
            MockReply::Rejected(500),
            MockReply::Malformed,
        ] {
            let dispatcher = dispatcher_with(MockBackend::with_replies(vec![reply.clone()]));
            let response = dispatcher
                .handle(LONG_QUERY, &mut QueryHistory::new(), &Settings::default())
                .await;
            assert_eq!(response.content(), FALLBACK_MESSAGE, "for {reply:?}");
            assert!(!response.is_redirect());
            assert!(response.redirect_url().is_none());
        }
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn fallback_is_logged_with_the_cause() {
        let dispatcher = dispatcher_with(MockBackend::with_replies(vec![MockReply::Rejected(404)]));
        dispatcher
            .handle(LONG_QUERY, &mut QueryHistory::new(), &Settings::default())
            .await;
        assert!(logs_contain("backend call failed"));
        assert!(logs_contain("404"));
    }

    #[tokio::test]
    async fn repeat_after_forward_skips_the_backend() {
        let backend = MockBackend::new();
        let dispatcher = dispatcher_with(backend.clone());
        let mut history = QueryHistory::new();
        let settings = Settings::default();

        dispatcher.handle(LONG_QUERY, &mut history, &settings).await;
        let second = dispatcher
            .handle(&LONG_QUERY.to_uppercase(), &mut history, &settings)
            .await;

        assert_eq!(second.content(), REPEATED_MESSAGE);
        assert_eq!(backend.call_count().await, 1);
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn from_config_wires_model_and_tag() {
        let mut config = SiftConfig::default();
        config.backend.model = "llama3:8b".into();
        config.output.reasoning_tag = "reasoning".into();
        config.output.reasoning_mode = ReasoningMode::Segment;

        let backend = MockBackend::with_responses(vec!["<reasoning>x</reasoning>ok".into()]);
        let dispatcher = Dispatcher::from_config(&config, Arc::new(backend.clone())).unwrap();
        assert_eq!(dispatcher.model(), "llama3:8b");

        let answer = dispatcher.forward("q", &Settings::default()).await.unwrap();
        assert_eq!(answer, "ok");
        assert_eq!(backend.requests().await[0].model, "llama3:8b");
    }
}
