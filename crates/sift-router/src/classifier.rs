// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-based query classification.
//!
//! Decides, before any network call, whether a query is refused, answered
//! from canned text, redirected to a search engine, or forwarded to the
//! inference backend. No LLM pre-call, no I/O.

use sift_config::model::RoutingConfig;
use sift_core::{Settings, SimplifyThreshold};
use tracing::debug;

use crate::decision::{
    command_help_message, RoutingDecision, OFF_TOPIC_MESSAGE, REDIRECT_MESSAGE, REPEATED_MESSAGE,
    SUGGEST_MESSAGE,
};
use crate::history::QueryHistory;
use crate::search::SearchTemplate;
use crate::tables::PhraseTable;

/// Heuristic query classifier driven by phrase tables.
///
/// Rules run in priority order and the first match wins:
/// 1. off-topic keyword
/// 2. repeated query
/// 3. bare shell-command name
/// 4. simple lookup (redirect or suggest a search)
/// 5. forward to the backend
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    off_topic: PhraseTable,
    simple_indicators: PhraseTable,
    shell_commands: PhraseTable,
    word_budget: u32,
    search: SearchTemplate,
}

impl QueryClassifier {
    /// Create a classifier with the built-in tables.
    pub fn new() -> Self {
        Self::from_config(&RoutingConfig::default())
    }

    /// Create a classifier from the `[routing]` configuration section.
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            off_topic: PhraseTable::new(&config.off_topic_keywords),
            simple_indicators: PhraseTable::new(&config.simple_indicators),
            shell_commands: PhraseTable::new(&config.shell_commands),
            word_budget: config.word_budget,
            search: SearchTemplate::new(config.search_url_template.clone()),
        }
    }

    /// Classify `query` for the session owning `history`.
    ///
    /// Every query that passes the off-topic filter is recorded into
    /// `history`. The repeat check scans the entries recorded *before* this
    /// call, so a first submission is never reported as repeated.
    pub fn classify(
        &self,
        query: &str,
        history: &mut QueryHistory,
        settings: &Settings,
    ) -> RoutingDecision {
        let normalized = query.to_lowercase();

        // 1. Off-topic filter. Substring matching over-matches ("weathering"),
        //    which is accepted.
        if let Some(keyword) = self.off_topic.find_substring(&normalized) {
            debug!(keyword, "query refused as off-topic");
            return RoutingDecision::Refuse {
                message: OFF_TOPIC_MESSAGE.to_string(),
            };
        }

        // 2. Repeat filter: scan, then record.
        let repeated = history.contains(query);
        history.record(query);
        if repeated {
            debug!(history_len = history.len(), "query already asked this session");
            return RoutingDecision::Repeated {
                message: REPEATED_MESSAGE.to_string(),
            };
        }

        // 3. Shell-command lookup
        if let Some(command) = self.shell_command(&normalized) {
            debug!(command, "query is a shell command name");
            return RoutingDecision::CommandHelp {
                message: command_help_message(command),
                command: command.to_string(),
            };
        }

        // 4. Simplicity classification
        let threshold = settings.simplify_threshold;
        if self.is_simple_query(query, threshold) {
            debug!(%threshold, "query classified as simple");
            return if threshold != SimplifyThreshold::Low {
                RoutingDecision::RedirectSearch {
                    message: REDIRECT_MESSAGE.to_string(),
                    search_url: self.search.url_for(query),
                }
            } else {
                RoutingDecision::SuggestSearch {
                    message: SUGGEST_MESSAGE.to_string(),
                }
            };
        }

        // 5. Fallback
        debug!("no local shortcut, forwarding");
        RoutingDecision::Forward {
            query: query.to_string(),
            settings: *settings,
        }
    }

    /// Whether the query contains an off-topic keyword.
    pub fn is_off_topic(&self, query: &str) -> bool {
        self.off_topic
            .find_substring(&query.to_lowercase())
            .is_some()
    }

    /// The command name if `normalized` (already lowercased) is a single
    /// known shell command.
    ///
    /// Any whitespace, including leading or trailing, or a character outside
    /// `[a-z0-9._-]` rules the query out.
    pub fn shell_command<'q>(&self, normalized: &'q str) -> Option<&'q str> {
        if normalized.is_empty() || normalized.contains(char::is_whitespace) {
            return None;
        }
        let well_formed = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'));
        (well_formed && self.shell_commands.contains(normalized)).then_some(normalized)
    }

    /// Whether `query` is a short lookup a search engine answers as well as
    /// the model: it contains a simple-indicator phrase and has fewer words
    /// than the word budget scaled by the threshold multiplier.
    pub fn is_simple_query(&self, query: &str, threshold: SimplifyThreshold) -> bool {
        let word_count = query.split_whitespace().count();
        let limit = f64::from(self.word_budget) * threshold.multiplier();
        if (word_count as f64) >= limit {
            return false;
        }
        self.simple_indicators
            .find_substring(&query.to_lowercase())
            .is_some()
    }

    /// The search template used for redirects.
    pub fn search_template(&self) -> &SearchTemplate {
        &self.search
    }
}

impl Default for QueryClassifier {
    fn default() -> Self {
        Self::new()
    }
}
