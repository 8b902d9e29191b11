// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sift ask` and `sift classify` command implementations.

use colored::Colorize;
use sift_config::model::SiftConfig;
use sift_core::{Settings, SiftError};
use sift_router::{QueryClassifier, QueryHistory, RoutingDecision};

use crate::shell::{build_session, print_response};

/// Answers one query in a fresh session.
pub async fn run_ask(
    config: &SiftConfig,
    query: &str,
    settings: &Settings,
    json: bool,
) -> Result<(), SiftError> {
    let session = build_session(config)?;
    let response = session.submit_query(query, settings).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&response)
            .map_err(|e| SiftError::Internal(format!("failed to serialize reply: {e}")))?;
        println!("{rendered}");
    } else {
        print_response(&response);
    }
    Ok(())
}

/// Prints the routing decision for `query` without contacting the backend.
pub fn run_classify(config: &SiftConfig, query: &str, settings: &Settings) {
    let classifier = QueryClassifier::from_config(&config.routing);
    let decision = classifier.classify(query, &mut QueryHistory::new(), settings);
    for line in describe(&decision) {
        println!("{line}");
    }
}

/// Human-readable lines describing a decision.
fn describe(decision: &RoutingDecision) -> Vec<String> {
    let mut lines = vec![format!("{} {}", "decision:".dimmed(), decision.kind().bold())];
    match decision {
        RoutingDecision::Forward { query, settings } => {
            lines.push(format!("{} {query}", "prompt:".dimmed()));
            lines.push(format!(
                "{} temperature={} max_tokens={}",
                "settings:".dimmed(),
                settings.temperature,
                settings.max_tokens
            ));
        }
        RoutingDecision::CommandHelp { command, message } => {
            lines.push(format!("{} {command}", "command:".dimmed()));
            lines.push(format!("{} {message}", "reply:".dimmed()));
        }
        RoutingDecision::RedirectSearch {
            message,
            search_url,
        } => {
            lines.push(format!("{} {message}", "reply:".dimmed()));
            lines.push(format!("{} {search_url}", "link:".dimmed()));
        }
        RoutingDecision::Refuse { message }
        | RoutingDecision::Repeated { message }
        | RoutingDecision::SuggestSearch { message } => {
            lines.push(format!("{} {message}", "reply:".dimmed()));
        }
    }
    lines
}
