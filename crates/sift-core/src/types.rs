// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the classifier, the dispatcher, and backend adapters.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::SiftError;

/// Accepted sampling temperatures.
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Accepted generation lengths, in tokens.
pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 10..=2048;

/// Unique identifier for a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by backend health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Backend is reachable and the configured model is installed.
    Healthy,
    /// Backend is reachable but not fully usable.
    Degraded(String),
    /// Backend is not reachable.
    Unhealthy(String),
}

/// How eagerly short, indicator-matching queries are sent to a search engine
/// instead of the model.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SimplifyThreshold {
    /// Rarely redirect: simple queries only get a suggestion.
    Low,
    /// Balanced.
    #[default]
    Medium,
    /// Often redirect: longer queries still count as simple.
    High,
}

impl SimplifyThreshold {
    /// Scale factor applied to the word budget of the simplicity check.
    pub fn multiplier(self) -> f64 {
        match self {
            SimplifyThreshold::Low => 0.5,
            SimplifyThreshold::Medium => 1.0,
            SimplifyThreshold::High => 1.5,
        }
    }
}

/// Per-request generation settings, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Sampling temperature passed through to the backend.
    pub temperature: f32,
    /// Maximum tokens to generate, passed through to the backend.
    pub max_tokens: u32,
    /// Aggressiveness of the simplicity classification.
    pub simplify_threshold: SimplifyThreshold,
}

impl Settings {
    /// Builds a settings snapshot, rejecting values outside the accepted ranges.
    pub fn new(
        temperature: f32,
        max_tokens: u32,
        simplify_threshold: SimplifyThreshold,
    ) -> Result<Self, SiftError> {
        let settings = Self {
            temperature,
            max_tokens,
            simplify_threshold,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that temperature and max_tokens are within range.
    pub fn validate(&self) -> Result<(), SiftError> {
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(SiftError::Config(format!(
                "temperature must be between {} and {}, got {}",
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end(),
                self.temperature
            )));
        }
        if !MAX_TOKENS_RANGE.contains(&self.max_tokens) {
            return Err(SiftError::Config(format!(
                "max_tokens must be between {} and {}, got {}",
                MAX_TOKENS_RANGE.start(),
                MAX_TOKENS_RANGE.end(),
                self.max_tokens
            )));
        }
        Ok(())
    }

    /// Returns a copy with a different simplify threshold.
    pub fn with_threshold(mut self, simplify_threshold: SimplifyThreshold) -> Self {
        self.simplify_threshold = simplify_threshold;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 512,
            simplify_threshold: SimplifyThreshold::Medium,
        }
    }
}

/// The reply handed back to the UI for one submitted query.
///
/// `redirect_url` is present exactly when `is_redirect` is true. The only
/// way to build one is through [`QueryResponse::text`] and
/// [`QueryResponse::redirect`], and deserialization rejects payloads that
/// break the pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawQueryResponse")]
pub struct QueryResponse {
    content: String,
    is_redirect: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_url: Option<String>,
}

impl QueryResponse {
    /// A plain text reply.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_redirect: false,
            redirect_url: None,
        }
    }

    /// A reply pointing the user at an external search.
    pub fn redirect(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_redirect: true,
            redirect_url: Some(url.into()),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_redirect(&self) -> bool {
        self.is_redirect
    }

    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQueryResponse {
    content: String,
    is_redirect: bool,
    #[serde(default)]
    redirect_url: Option<String>,
}

impl TryFrom<RawQueryResponse> for QueryResponse {
    type Error = String;

    fn try_from(raw: RawQueryResponse) -> Result<Self, Self::Error> {
        match (raw.is_redirect, raw.redirect_url) {
            (true, Some(url)) => Ok(QueryResponse::redirect(raw.content, url)),
            (false, None) => Ok(QueryResponse::text(raw.content)),
            (true, None) => Err("isRedirect is true but redirectUrl is missing".into()),
            (false, Some(_)) => Err("redirectUrl is set but isRedirect is false".into()),
        }
    }
}

/// A single non-streaming generation request for the inference backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Model identifier understood by the backend.
    pub model: String,
    /// The raw user query.
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerateRequest {
    /// Builds a request for `prompt` with the pass-through fields of `settings`.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, settings: &Settings) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

/// The full generated text returned by the backend, before post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutput {
    pub text: String,
    /// Model that produced the text, when the backend reports it.
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn threshold_multipliers() {
        assert_eq!(SimplifyThreshold::Low.multiplier(), 0.5);
        assert_eq!(SimplifyThreshold::Medium.multiplier(), 1.0);
        assert_eq!(SimplifyThreshold::High.multiplier(), 1.5);
    }

    #[test]
    fn threshold_parses_case_insensitively() {
        assert_eq!(
            SimplifyThreshold::from_str("HIGH").unwrap(),
            SimplifyThreshold::High
        );
        assert_eq!(SimplifyThreshold::Low.to_string(), "low");
        assert!(SimplifyThreshold::from_str("extreme").is_err());
    }

    #[test]
    fn threshold_serde_is_lowercase() {
        let json = serde_json::to_string(&SimplifyThreshold::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }

    #[test]
    fn default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_tokens, 512);
        assert_eq!(settings.simplify_threshold, SimplifyThreshold::Medium);
    }

    #[test]
    fn settings_reject_out_of_range_values() {
        assert!(Settings::new(1.5, 512, SimplifyThreshold::Low).is_err());
        assert!(Settings::new(-0.1, 512, SimplifyThreshold::Low).is_err());
        assert!(Settings::new(0.5, 9, SimplifyThreshold::Low).is_err());
        assert!(Settings::new(0.5, 2049, SimplifyThreshold::Low).is_err());
        assert!(Settings::new(0.0, 10, SimplifyThreshold::High).is_ok());
        assert!(Settings::new(1.0, 2048, SimplifyThreshold::High).is_ok());
    }

    #[test]
    fn text_response_serializes_without_url() {
        let json = serde_json::to_value(QueryResponse::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"content": "hi", "isRedirect": false}));
    }

    #[test]
    fn redirect_response_serializes_url() {
        let response = QueryResponse::redirect("look", "https://example.com/?q=x");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["isRedirect"], true);
        assert_eq!(json["redirectUrl"], "https://example.com/?q=x");
    }

    #[test]
    fn deserialize_rejects_unpaired_redirect() {
        let bad = r#"{"content":"x","isRedirect":true}"#;
        assert!(serde_json::from_str::<QueryResponse>(bad).is_err());
        let bad = r#"{"content":"x","isRedirect":false,"redirectUrl":"u"}"#;
        assert!(serde_json::from_str::<QueryResponse>(bad).is_err());
        let ok = r#"{"content":"x","isRedirect":true,"redirectUrl":"u"}"#;
        let parsed: QueryResponse = serde_json::from_str(ok).unwrap();
        assert_eq!(parsed.redirect_url(), Some("u"));
    }

    #[test]
    fn generate_request_copies_pass_through_fields() {
        let settings = Settings::new(0.2, 64, SimplifyThreshold::High).unwrap();
        let request = GenerateRequest::new("m", "hello", &settings);
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 64);
        assert_eq!(request.prompt, "hello");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn redirect_flag_matches_url_presence(content in ".*", url in proptest::option::of(".+")) {
                let response = match &url {
                    Some(u) => QueryResponse::redirect(content.clone(), u.clone()),
                    None => QueryResponse::text(content.clone()),
                };
                prop_assert_eq!(response.is_redirect(), response.redirect_url().is_some());
            }
        }
    }
}
