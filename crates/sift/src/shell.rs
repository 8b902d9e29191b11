// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sift shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline history.
//! Every line is submitted to one [`ChatSession`]; slash commands manage the
//! session and the per-query settings.

use std::str::FromStr;
use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sift_agent::{ChatSession, Dispatcher};
use sift_config::model::SiftConfig;
use sift_core::{QueryResponse, Settings, SiftError, SimplifyThreshold};
use sift_ollama::OllamaBackend;
use tracing::debug;

/// A slash command typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
enum ShellCommand {
    Quit,
    NewChat,
    ShowSettings,
    Set(Settings),
    Help,
}

/// Builds a session over the configured Ollama backend.
pub(crate) fn build_session(config: &SiftConfig) -> Result<ChatSession, SiftError> {
    let backend = OllamaBackend::new(&config.backend)?;
    let dispatcher = Dispatcher::from_config(config, Arc::new(backend))?;
    Ok(ChatSession::new(Arc::new(dispatcher)))
}

/// Prints a reply, with the search link underneath for redirects.
pub(crate) fn print_response(response: &QueryResponse) {
    println!("{}", response.content());
    if let Some(url) = response.redirect_url() {
        println!("{}", url.blue().underline());
    }
}

/// Runs the `sift shell` interactive REPL.
pub async fn run_shell(config: SiftConfig) -> Result<(), SiftError> {
    let session = build_session(&config)?;
    let mut settings = config.defaults.to_settings();

    let mut rl = DefaultEditor::new()
        .map_err(|e| SiftError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "sift shell".bold().green());
    println!(
        "Type {} for commands, {} to exit.\n",
        "/help".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", config.agent.name.green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match parse_command(trimmed, &settings) {
                    Some(Ok(ShellCommand::Quit)) => break,
                    Some(Ok(ShellCommand::NewChat)) => {
                        let id = session.reset().await?;
                        debug!(session_id = %id, "new chat from shell");
                        println!("{}", "New chat started.".dimmed());
                    }
                    Some(Ok(ShellCommand::ShowSettings)) => print_settings(&settings),
                    Some(Ok(ShellCommand::Set(updated))) => {
                        settings = updated;
                        print_settings(&settings);
                    }
                    Some(Ok(ShellCommand::Help)) => print_help(),
                    Some(Err(message)) => eprintln!("{}: {message}", "error".red()),
                    None => match session.submit_query(trimmed, &settings).await {
                        Ok(response) => {
                            print_response(&response);
                            println!();
                        }
                        Err(e) => eprintln!("{}: {e}", "error".red()),
                    },
                }
            }
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    Ok(())
}

/// Interprets `line` as a slash command.
///
/// Returns `None` when the first word is not a known command, so input like
/// `/etc/hosts is ignored` is submitted as a query.
fn parse_command(line: &str, current: &Settings) -> Option<Result<ShellCommand, String>> {
    let mut words = line.split_whitespace();
    let command = match words.next()? {
        "/quit" | "/exit" => Ok(ShellCommand::Quit),
        "/new" => Ok(ShellCommand::NewChat),
        "/settings" => Ok(ShellCommand::ShowSettings),
        "/help" => Ok(ShellCommand::Help),
        "/set" => match (words.next(), words.next()) {
            (Some(key), Some(value)) => apply_setting(current, key, value).map(ShellCommand::Set),
            _ => Err("usage: /set temperature|max_tokens|threshold <value>".to_string()),
        },
        _ => return None,
    };
    Some(command)
}

/// Returns `current` with one field changed, validated against its range.
fn apply_setting(current: &Settings, key: &str, value: &str) -> Result<Settings, String> {
    let mut updated = *current;
    match key {
        "temperature" => {
            updated.temperature = value
                .parse()
                .map_err(|_| format!("`{value}` is not a number"))?;
        }
        "max_tokens" | "max-tokens" => {
            updated.max_tokens = value
                .parse()
                .map_err(|_| format!("`{value}` is not a whole number"))?;
        }
        "threshold" => {
            updated.simplify_threshold = SimplifyThreshold::from_str(value)
                .map_err(|_| format!("`{value}` is not one of: low, medium, high"))?;
        }
        other => return Err(format!("unknown setting `{other}`")),
    }
    updated.validate().map_err(|e| e.to_string())?;
    Ok(updated)
}

fn print_settings(settings: &Settings) {
    println!(
        "{} temperature={} max_tokens={} threshold={}",
        "settings:".dimmed(),
        settings.temperature,
        settings.max_tokens,
        settings.simplify_threshold
    );
}

fn print_help() {
    println!("  /new                      start a new chat");
    println!("  /settings                 show the current settings");
    println!("  /set temperature <0-1>    sampling temperature");
    println!("  /set max_tokens <10-2048> maximum reply length");
    println!("  /set threshold <level>    low, medium or high");
    println!("  /quit, /exit              leave the shell");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Settings {
        Settings::default()
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert!(parse_command("why is cargo slow", &defaults()).is_none());
        assert!(parse_command("/etc/hosts is ignored", &defaults()).is_none());
    }

    #[test]
    fn quit_and_exit_both_quit() {
        for line in ["/quit", "/exit", "  /exit  "] {
            assert_eq!(
                parse_command(line.trim(), &defaults()),
                Some(Ok(ShellCommand::Quit))
            );
        }
    }

    #[test]
    fn set_updates_one_field() {
        let Some(Ok(ShellCommand::Set(s))) = parse_command("/set threshold low", &defaults()) else {
            panic!("expected a set command");
        };
        assert_eq!(s.simplify_threshold, SimplifyThreshold::Low);
        assert_eq!(s.temperature, defaults().temperature);

        let Some(Ok(ShellCommand::Set(s))) = parse_command("/set max_tokens 1024", &defaults())
        else {
            panic!("expected a set command");
        };
        assert_eq!(s.max_tokens, 1024);
    }

    #[test]
    fn set_rejects_out_of_range_and_garbage() {
        assert!(matches!(
            parse_command("/set temperature 2", &defaults()),
            Some(Err(_))
        ));
        assert!(matches!(
            parse_command("/set max_tokens lots", &defaults()),
            Some(Err(_))
        ));
        assert!(matches!(
            parse_command("/set verbosity 3", &defaults()),
            Some(Err(msg)) if msg.contains("verbosity")
        ));
        assert!(matches!(parse_command("/set temperature", &defaults()), Some(Err(_))));
    }

    #[test]
    fn session_builds_from_default_config() {
        let session = build_session(&SiftConfig::default()).unwrap();
        assert_eq!(session.state(), sift_agent::SessionState::Idle);
    }
}
