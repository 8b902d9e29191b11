// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: chat session -> dispatcher -> backend.

use std::sync::Arc;

use sift_agent::{ChatSession, Dispatcher, FALLBACK_MESSAGE, SessionState};
use sift_config::model::{ReasoningMode, RoutingConfig, SiftConfig};
use sift_core::{Settings, SiftError, SimplifyThreshold};
use sift_ollama::OllamaBackend;
use sift_router::decision::{OFF_TOPIC_MESSAGE, REPEATED_MESSAGE, SUGGEST_MESSAGE};
use sift_test_utils::{MockReply, TestHarness, closed_port_url};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORWARDED: &str = "how can I shrink the size of a release binary built with cargo";

#[tokio::test]
async fn harness_forwards_and_strips_reasoning() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["<think>strip, lto</think>\nSet `strip = true`.".into()])
        .build()
        .unwrap();

    let response = harness.send_message(FORWARDED).await.unwrap();
    assert_eq!(response.content(), "strip, lto\nSet `strip = true`.");
    assert!(!response.is_redirect());
    assert_eq!(harness.mock_backend.call_count().await, 1);
}

#[tokio::test]
async fn harness_repeat_is_answered_locally() {
    let harness = TestHarness::builder().build().unwrap();

    harness.send_message(FORWARDED).await.unwrap();
    let again = harness
        .send_message(&format!("  {}  ", FORWARDED.to_uppercase()))
        .await
        .unwrap();

    assert_eq!(again.content(), REPEATED_MESSAGE);
    assert_eq!(harness.mock_backend.call_count().await, 1);
}

#[tokio::test]
async fn off_topic_is_not_recorded() {
    let harness = TestHarness::builder().build().unwrap();

    let first = harness.send_message("travel tips for linux users").await.unwrap();
    let second = harness.send_message("travel tips for linux users").await.unwrap();
    assert_eq!(first.content(), OFF_TOPIC_MESSAGE);
    assert_eq!(second.content(), OFF_TOPIC_MESSAGE);
    assert_eq!(harness.session.history_len().await, 0);
    assert_eq!(harness.session.transcript().await.len(), 4);
}

#[tokio::test]
async fn low_threshold_suggests_instead_of_redirecting() {
    let harness = TestHarness::builder().build().unwrap();
    let low = Settings::default().with_threshold(SimplifyThreshold::Low);

    let response = harness.send_with("define TCP", &low).await.unwrap();
    assert_eq!(response.content(), SUGGEST_MESSAGE);
    assert!(response.redirect_url().is_none());
}

#[tokio::test]
async fn custom_routing_tables_apply() {
    let routing = RoutingConfig {
        shell_commands: vec!["rg".into()],
        search_url_template: "https://duckduckgo.com/?q={query}".into(),
        ..RoutingConfig::default()
    };
    let harness = TestHarness::builder().with_routing(routing).build().unwrap();

    let help = harness.send_message("rg").await.unwrap();
    assert_eq!(help.content(), "Check the manual with: man rg");

    let ls = harness.send_message("ls").await.unwrap();
    assert_ne!(ls.content(), "Check the manual with: man ls");

    let redirect = harness.send_message("what is a mutex").await.unwrap();
    assert_eq!(
        redirect.redirect_url(),
        Some("https://duckduckgo.com/?q=what%20is%20a%20mutex")
    );
}

#[tokio::test]
async fn backend_failure_keeps_session_usable() {
    let harness = TestHarness::builder()
        .with_mock_replies(vec![MockReply::Unreachable, MockReply::Text("fine now".into())])
        .build()
        .unwrap();

    let failed = harness.send_message(FORWARDED).await.unwrap();
    assert_eq!(failed.content(), FALLBACK_MESSAGE);
    assert_eq!(harness.session.state(), SessionState::Idle);

    let next = harness
        .send_message("why is my docker image so large after adding build tools")
        .await
        .unwrap();
    assert_eq!(next.content(), "fine now");
}

fn config_for(server: &MockServer) -> SiftConfig {
    let mut config = SiftConfig::default();
    config.backend.base_url = server.uri();
    config.backend.timeout_secs = 5;
    config
}

fn session_over_ollama(config: &SiftConfig) -> ChatSession {
    let backend = OllamaBackend::new(&config.backend).unwrap();
    let dispatcher = Dispatcher::from_config(config, Arc::new(backend)).unwrap();
    ChatSession::new(Arc::new(dispatcher))
}

#[tokio::test]
async fn ollama_round_trip_sends_settings_and_cleans_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "deepseek-r1:7b",
            "prompt": FORWARDED,
            "max_tokens": 300,
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "deepseek-r1:7b",
            "response": "<think>\nthe user wants smaller binaries\n</think>\n\nEnable LTO and strip symbols.",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.output.reasoning_mode = ReasoningMode::Segment;
    let session = session_over_ollama(&config);

    let settings = Settings::new(0.5, 300, SimplifyThreshold::Medium).unwrap();
    let response = session.submit_query(FORWARDED, &settings).await.unwrap();
    assert_eq!(response.content(), "Enable LTO and strip symbols.");
}

#[tokio::test]
async fn ollama_error_status_becomes_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let session = session_over_ollama(&config_for(&server));
    let response = session
        .submit_query(FORWARDED, &Settings::default())
        .await
        .unwrap();
    assert_eq!(response.content(), FALLBACK_MESSAGE);
    assert!(!response.is_redirect());
}

#[tokio::test]
async fn unreachable_ollama_becomes_fallback() {
    let mut config = SiftConfig::default();
    config.backend.base_url = closed_port_url().unwrap();
    config.backend.timeout_secs = 5;

    let dispatcher =
        Dispatcher::from_config(&config, Arc::new(OllamaBackend::new(&config.backend).unwrap()))
            .unwrap();
    let err = dispatcher
        .forward(FORWARDED, &Settings::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SiftError::NetworkUnreachable { .. }), "got {err:?}");

    let session = session_over_ollama(&config);
    let response = session
        .submit_query(FORWARDED, &Settings::default())
        .await
        .unwrap();
    assert_eq!(response.content(), FALLBACK_MESSAGE);
}

#[tokio::test]
async fn canned_replies_never_touch_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_over_ollama(&config_for(&server));
    let settings = Settings::default();
    for query in ["music for coding", "git", "what is TCP", "define TCP"] {
        session.submit_query(query, &settings).await.unwrap();
    }
}
