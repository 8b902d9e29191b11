// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search-engine redirect URLs.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sift_config::model::QUERY_PLACEHOLDER;

/// Characters escaped in a query-string component.
///
/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the same set browsers
/// leave alone in `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A search URL with a `{query}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTemplate {
    template: String,
}

impl SearchTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitutes the percent-encoded `query` into the template.
    pub fn url_for(&self, query: &str) -> String {
        self.template
            .replace(QUERY_PLACEHOLDER, &encode_component(query))
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

/// Percent-encodes `raw` for use as a single query-string value.
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_COMPONENT).to_string()
}
