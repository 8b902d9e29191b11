// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The classifier's verdict for a single query.

use sift_core::{QueryResponse, Settings};

/// Reply for queries outside the technical domain.
pub const OFF_TOPIC_MESSAGE: &str = "I only answer technical questions related to computing.";

/// Reply for a query already asked in this session.
pub const REPEATED_MESSAGE: &str =
    "This question has already been asked. Please check the conversation history.";

/// Reply for queries simple enough to look up directly.
pub const REDIRECT_MESSAGE: &str = "This question is very simple and can be easily found on the internet. Let me help you search for it:";

/// Reply for simple queries when redirects are turned down.
pub const SUGGEST_MESSAGE: &str = "This question could be easily answered by searching on the internet. I'd recommend checking there first for basic information like this.";

/// Builds the man-page pointer for a recognized command.
pub fn command_help_message(command: &str) -> String {
    format!("Check the manual with: man {command}")
}

/// Where a query goes, decided before any network call.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingDecision {
    /// Off-topic query.
    Refuse { message: String },
    /// Query already asked this session.
    Repeated { message: String },
    /// Query is a bare shell-command name.
    CommandHelp { command: String, message: String },
    /// Query is very simple: point at a search engine.
    RedirectSearch { message: String, search_url: String },
    /// Query is simple, but the threshold is low: suggest searching.
    SuggestSearch { message: String },
    /// No local shortcut applies; send to the backend.
    Forward { query: String, settings: Settings },
}

impl RoutingDecision {
    /// Stable label for logs and the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            RoutingDecision::Refuse { .. } => "refuse",
            RoutingDecision::Repeated { .. } => "repeated",
            RoutingDecision::CommandHelp { .. } => "command_help",
            RoutingDecision::RedirectSearch { .. } => "redirect_search",
            RoutingDecision::SuggestSearch { .. } => "suggest_search",
            RoutingDecision::Forward { .. } => "forward",
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, RoutingDecision::Forward { .. })
    }

    /// The canned reply for short-circuit decisions; `None` for `Forward`.
    pub fn canned_response(&self) -> Option<QueryResponse> {
        match self {
            RoutingDecision::Refuse { message }
            | RoutingDecision::Repeated { message }
            | RoutingDecision::CommandHelp { message, .. }
            | RoutingDecision::SuggestSearch { message } => Some(QueryResponse::text(message)),
            RoutingDecision::RedirectSearch {
                message,
                search_url,
            } => Some(QueryResponse::redirect(message, search_url)),
            RoutingDecision::Forward { .. } => None,
        }
    }
}

impl std::fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}
