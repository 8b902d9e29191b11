// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL syntax, numeric ranges, and non-empty classifier tables.

use sift_core::types::{MAX_TOKENS_RANGE, TEMPERATURE_RANGE};

use crate::diagnostic::ConfigError;
use crate::model::{SiftConfig, QUERY_PLACEHOLDER};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SiftConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    // Backend endpoint
    match url::Url::parse(&config.backend.base_url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => fail(format!(
            "backend.base_url must use http or https, got scheme `{}`",
            parsed.scheme()
        )),
        Err(e) => fail(format!(
            "backend.base_url `{}` is not a valid URL: {e}",
            config.backend.base_url
        )),
    }

    if !config.backend.generate_path.starts_with('/') {
        fail(format!(
            "backend.generate_path must start with `/`, got `{}`",
            config.backend.generate_path
        ));
    }

    if config.backend.model.trim().is_empty() {
        fail("backend.model must not be empty".to_string());
    }

    if config.backend.timeout_secs == 0 {
        fail("backend.timeout_secs must be greater than zero".to_string());
    }

    // Session defaults
    let temperature = config.defaults.temperature;
    if !TEMPERATURE_RANGE.contains(&temperature) {
        fail(format!(
            "defaults.temperature must be between {} and {}, got {temperature}",
            TEMPERATURE_RANGE.start(),
            TEMPERATURE_RANGE.end()
        ));
    }

    let max_tokens = config.defaults.max_tokens;
    if !MAX_TOKENS_RANGE.contains(&max_tokens) {
        fail(format!(
            "defaults.max_tokens must be between {} and {}, got {max_tokens}",
            MAX_TOKENS_RANGE.start(),
            MAX_TOKENS_RANGE.end()
        ));
    }

    // Routing tables
    let tables = [
        ("routing.off_topic_keywords", &config.routing.off_topic_keywords),
        ("routing.simple_indicators", &config.routing.simple_indicators),
        ("routing.shell_commands", &config.routing.shell_commands),
    ];
    for (name, entries) in tables {
        if entries.is_empty() {
            fail(format!("{name} must contain at least one entry"));
        }
        if let Some(i) = entries.iter().position(|e| e.trim().is_empty()) {
            fail(format!("{name}[{i}] must not be blank"));
        }
    }

    if config.routing.word_budget == 0 {
        fail("routing.word_budget must be greater than zero".to_string());
    }

    if !config.routing.search_url_template.contains(QUERY_PLACEHOLDER) {
        fail(format!(
            "routing.search_url_template must contain the `{QUERY_PLACEHOLDER}` placeholder"
        ));
    }

    // Output
    let tag = &config.output.reasoning_tag;
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        fail(format!(
            "output.reasoning_tag must be a non-empty tag name (letters, digits, `_`, `-`), got `{tag}`"
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
