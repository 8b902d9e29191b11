// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session record of submitted queries.

/// Ordered, append-only list of the queries submitted in one session.
///
/// Entries are never edited or removed; a new session starts from a fresh
/// history. Lookups compare trimmed, lowercased text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryHistory {
    entries: Vec<String>,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query exactly as submitted.
    pub fn record(&mut self, query: impl Into<String>) {
        self.entries.push(query.into());
    }

    /// Whether an equivalent query (case- and surrounding-whitespace-insensitive)
    /// was recorded before.
    pub fn contains(&self, query: &str) -> bool {
        let needle = normalize(query);
        self.entries.iter().any(|entry| normalize(entry) == needle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}
