// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Sift.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use sift_core::{Settings, SimplifyThreshold};

/// Non-technical keywords that make a query off-topic (substring match).
pub const DEFAULT_OFF_TOPIC_KEYWORDS: &[&str] = &[
    "weather", "sport", "movie", "music", "food", "restaurant", "travel",
    "holiday", "vacation", "shopping", "news", "politics",
];

/// Phrases marking a query as a lookup a search engine answers just as well.
pub const DEFAULT_SIMPLE_INDICATORS: &[&str] = &[
    "what is", "who is", "where is", "when is", "how to",
    "define", "meaning of", "weather in", "capital of", "population of",
    "explain", "example of", "list of", "steps to", "why is",
    "history of", "facts about", "distance to", "time in", "recipe for",
    "benefits of", "uses of", "difference between", "symptoms of",
    "causes of", "treatment for", "how does", "how much", "how many",
    "types of", "advantages of", "disadvantages of", "origin of",
    "purpose of", "importance of", "process of", "function of",
];

/// Common Unix command names answered with a pointer to their man page.
pub const DEFAULT_SHELL_COMMANDS: &[&str] = &[
    "ls", "cd", "pwd", "cp", "mv", "rm", "mkdir", "rmdir", "touch",
    "cat", "echo", "grep", "find", "chmod", "chown", "curl", "wget",
    "tar", "zip", "unzip", "head", "tail", "less", "more", "du", "df",
    "ps", "top", "kill", "ssh", "scp", "sed", "awk", "nano", "vim",
    "git", "docker", "systemctl", "service", "apt", "yum", "pip",
    "npm", "node",
];

/// Placeholder replaced by the percent-encoded query in the search template.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Top-level Sift configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiftConfig {
    /// Agent identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Inference backend endpoint settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Initial per-session generation settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Classifier tables and search redirect settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Post-processing of backend output.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Agent identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in the shell prompt.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "sift".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Inference backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the backend (scheme, host, port).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the generation endpoint, appended to `base_url`.
    #[serde(default = "default_generate_path")]
    pub generate_path: String,

    /// Model identifier sent with every generation request.
    #[serde(default = "default_backend_model")]
    pub model: String,

    /// Transport timeout for a single backend call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            generate_path: default_generate_path(),
            model: default_backend_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Full URL of the generation endpoint.
    pub fn generate_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.generate_path
        )
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_generate_path() -> String {
    "/api/generate".to_string()
}

fn default_backend_model() -> String {
    "deepseek-r1:7b".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Generation settings a new session starts with.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// One of "low", "medium", "high".
    #[serde(default)]
    pub simplify_threshold: SimplifyThreshold,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            simplify_threshold: SimplifyThreshold::default(),
        }
    }
}

impl DefaultsConfig {
    /// The settings snapshot described by this section (unvalidated).
    pub fn to_settings(&self) -> Settings {
        Settings {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            simplify_threshold: self.simplify_threshold,
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    512
}

/// Classifier tables and search redirect configuration.
///
/// The phrase lists are plain data; the classifier only asks them whether a
/// query matches.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Keywords that make a query off-topic (substring, case-insensitive).
    #[serde(default = "default_off_topic_keywords")]
    pub off_topic_keywords: Vec<String>,

    /// Phrases that mark a query as a simple lookup (substring, case-insensitive).
    #[serde(default = "default_simple_indicators")]
    pub simple_indicators: Vec<String>,

    /// Command names answered with a man-page pointer (exact token).
    #[serde(default = "default_shell_commands")]
    pub shell_commands: Vec<String>,

    /// Base word budget for simple queries, scaled by the threshold multiplier.
    #[serde(default = "default_word_budget")]
    pub word_budget: u32,

    /// Search URL with a `{query}` placeholder.
    #[serde(default = "default_search_url_template")]
    pub search_url_template: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            off_topic_keywords: default_off_topic_keywords(),
            simple_indicators: default_simple_indicators(),
            shell_commands: default_shell_commands(),
            word_budget: default_word_budget(),
            search_url_template: default_search_url_template(),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_off_topic_keywords() -> Vec<String> {
    to_owned_list(DEFAULT_OFF_TOPIC_KEYWORDS)
}

fn default_simple_indicators() -> Vec<String> {
    to_owned_list(DEFAULT_SIMPLE_INDICATORS)
}

fn default_shell_commands() -> Vec<String> {
    to_owned_list(DEFAULT_SHELL_COMMANDS)
}

fn default_word_budget() -> u32 {
    6
}

fn default_search_url_template() -> String {
    "https://letmegooglethat.com/?q={query}".to_string()
}

/// What to remove from backend output around reasoning-trace tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningMode {
    /// Remove the start/end tags, keep the text between them.
    #[default]
    Tags,
    /// Remove the tags and everything between them.
    Segment,
}

/// Backend output post-processing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Name of the reasoning-trace tag, without angle brackets.
    #[serde(default = "default_reasoning_tag")]
    pub reasoning_tag: String,

    #[serde(default)]
    pub reasoning_mode: ReasoningMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reasoning_tag: default_reasoning_tag(),
            reasoning_mode: ReasoningMode::default(),
        }
    }
}

fn default_reasoning_tag() -> String {
    "think".to_string()
}
