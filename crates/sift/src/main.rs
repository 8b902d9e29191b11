// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sift - a terminal chat front-end for a local language model.
//!
//! This is the binary entry point. Queries are classified locally first;
//! only the ones no shortcut can answer reach the model server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod ask;
mod doctor;
mod shell;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sift_config::model::{DefaultsConfig, SiftConfig};
use sift_core::{Settings, SiftError, SimplifyThreshold};

/// Sift - answers what it can locally, forwards the rest to a local model.
#[derive(Parser, Debug)]
#[command(name = "sift", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive chat session (the default).
    Shell,
    /// Answer a single query and exit.
    Ask {
        /// The query text.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Print the reply as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show how a query would be routed, without contacting the backend.
    Classify {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Simplify threshold to classify with.
        #[arg(long)]
        threshold: Option<SimplifyThreshold>,
    },
    /// Check configuration and backend health.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

/// Per-call overrides of the `[defaults]` section.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct SettingsArgs {
    /// Sampling temperature, 0.0 to 1.0.
    #[arg(long)]
    temperature: Option<f32>,
    /// Maximum tokens to generate, 10 to 2048.
    #[arg(long)]
    max_tokens: Option<u32>,
    /// How eagerly simple queries are sent to a search engine.
    #[arg(long)]
    threshold: Option<SimplifyThreshold>,
}

impl SettingsArgs {
    /// Applies the overrides on top of the configured defaults.
    pub(crate) fn resolve(&self, defaults: &DefaultsConfig) -> Result<Settings, SiftError> {
        let base = defaults.to_settings();
        Settings::new(
            self.temperature.unwrap_or(base.temperature),
            self.max_tokens.unwrap_or(base.max_tokens),
            self.threshold.unwrap_or(base.simplify_threshold),
        )
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => sift_config::load_and_validate_path(path),
        None => sift_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            sift_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    if let Err(e) = run(cli.command, config).await {
        eprintln!("sift: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Option<Commands>, config: SiftConfig) -> Result<(), SiftError> {
    match command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run_shell(config).await,
        Commands::Ask {
            query,
            settings,
            json,
        } => {
            let settings = settings.resolve(&config.defaults)?;
            ask::run_ask(&config, &query.join(" "), &settings, json).await
        }
        Commands::Classify { query, threshold } => {
            let settings = SettingsArgs {
                threshold,
                ..SettingsArgs::default()
            }
            .resolve(&config.defaults)?;
            ask::run_classify(&config, &query.join(" "), &settings);
            Ok(())
        }
        Commands::Doctor { plain } => doctor::run_doctor(&config, plain).await,
        Commands::Config => {
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| SiftError::Internal(format!("failed to render configuration: {e}")))?;
            print!("{rendered}");
            Ok(())
        }
    }
}

/// Logs go to stderr so `ask --json` output stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sift={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_ask_overrides() {
        let cli = Cli::try_parse_from([
            "sift",
            "ask",
            "--temperature",
            "0.2",
            "--threshold",
            "HIGH",
            "why",
            "is",
            "it",
            "slow",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Ask {
                query, settings, ..
            }) => {
                assert_eq!(query.join(" "), "why is it slow");
                assert_eq!(settings.temperature, Some(0.2));
                assert_eq!(settings.threshold, Some(SimplifyThreshold::High));
                assert_eq!(settings.max_tokens, None);
            }
            other => panic!("expected ask, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_threshold() {
        assert!(Cli::try_parse_from(["sift", "classify", "--threshold", "extreme", "q"]).is_err());
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["sift", "doctor", "--config", "/tmp/sift.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sift.toml")));
    }

    #[test]
    fn overrides_fall_back_to_defaults() {
        let defaults = DefaultsConfig::default();
        let settings = SettingsArgs {
            max_tokens: Some(64),
            ..SettingsArgs::default()
        }
        .resolve(&defaults)
        .unwrap();
        assert_eq!(settings.max_tokens, 64);
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.simplify_threshold, SimplifyThreshold::Medium);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let args = SettingsArgs {
            temperature: Some(1.5),
            ..SettingsArgs::default()
        };
        assert!(args.resolve(&DefaultsConfig::default()).is_err());
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = sift_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.agent.name, "sift");
    }
}
