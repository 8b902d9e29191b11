// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sift doctor` command implementation.
//!
//! Runs diagnostic checks against the configuration and the model server to
//! find out why queries might be answered with the fallback reply.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use sift_agent::ReasoningFilter;
use sift_config::model::SiftConfig;
use sift_core::{HealthStatus, PluginAdapter, SiftError};
use sift_ollama::OllamaBackend;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run the `sift doctor` command.
///
/// With `plain`, or when stdout is not a terminal, prints without color.
pub async fn run_doctor(config: &SiftConfig, plain: bool) -> Result<(), SiftError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_output_filter(config),
        check_backend(config).await,
    ];

    println!();
    println!("  sift doctor");
    println!("  {}", "-".repeat(50));

    let mut issues = 0;
    for result in &results {
        if result.status != CheckStatus::Pass {
            issues += 1;
        }
        println!("{}", format_result(result, use_color));
    }

    println!();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(())
}

fn format_result(result: &CheckResult, use_color: bool) -> String {
    use colored::Colorize;

    let duration_ms = result.duration.as_millis();
    let (symbol, message) = match (&result.status, use_color) {
        (CheckStatus::Pass, true) => ("✓".green().to_string(), result.message.normal().to_string()),
        (CheckStatus::Warn, true) => ("!".yellow().to_string(), result.message.yellow().to_string()),
        (CheckStatus::Fail, true) => ("✗".red().to_string(), result.message.red().to_string()),
        (CheckStatus::Pass, false) => ("[OK]  ".to_string(), result.message.clone()),
        (CheckStatus::Warn, false) => ("[WARN]".to_string(), result.message.clone()),
        (CheckStatus::Fail, false) => ("[FAIL]".to_string(), result.message.clone()),
    };
    format!(
        "    {symbol} {:<20} {message} ({duration_ms}ms)",
        result.name
    )
}

/// Check the reasoning-tag filter compiles.
fn check_output_filter(config: &SiftConfig) -> CheckResult {
    let start = Instant::now();
    let (status, message) = match ReasoningFilter::from_config(&config.output) {
        Ok(_) => (
            CheckStatus::Pass,
            format!(
                "<{}> tags, {:?} mode",
                config.output.reasoning_tag, config.output.reasoning_mode
            ),
        ),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: "Output filter".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

/// Check the model server is reachable and has the configured model.
async fn check_backend(config: &SiftConfig) -> CheckResult {
    let start = Instant::now();
    let name = "Model server".to_string();

    let backend = match OllamaBackend::new(&config.backend) {
        Ok(backend) => backend,
        Err(e) => {
            return CheckResult {
                name,
                status: CheckStatus::Fail,
                message: e.to_string(),
                duration: start.elapsed(),
            };
        }
    };

    let (status, message) = match backend.health_check().await {
        Ok(HealthStatus::Healthy) => (
            CheckStatus::Pass,
            format!("{} available at {}", config.backend.model, config.backend.base_url),
        ),
        Ok(HealthStatus::Degraded(reason)) => (
            CheckStatus::Warn,
            format!("{reason} (try `ollama pull {}`)", config.backend.model),
        ),
        Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, reason),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };

    CheckResult {
        name,
        status,
        message,
        duration: start.elapsed(),
    }
}
