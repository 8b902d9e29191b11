// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sift.toml` > `~/.config/sift/sift.toml` > `/etc/sift/sift.toml`
//! with environment variable overrides via `SIFT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SiftConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/sift/sift.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "sift.toml";

/// Path of the per-user configuration file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sift").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sift/sift.toml` (system-wide)
/// 3. `~/.config/sift/sift.toml` (user XDG config)
/// 4. `./sift.toml` (local directory)
/// 5. `SIFT_*` environment variables
pub fn load_config() -> Result<SiftConfig, figment::Error> {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(SiftConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SiftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SiftConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SiftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SiftConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SIFT_BACKEND_BASE_URL` must map to `backend.base_url`, not
/// `backend.base.url`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("SIFT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SIFT_BACKEND_BASE_URL -> "backend_base_url"
        map_env_key(key.as_str()).into()
    })
}

/// Maps a lowercased, prefix-stripped env key to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: &[&str] = &["agent", "backend", "defaults", "routing", "output"];
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}
