// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reasoning-trace removal for generated text.
//!
//! Reasoning models wrap their chain of thought in markup such as
//! `<think>...</think>`. [`ReasoningFilter`] removes that markup before the
//! text reaches the user.

use regex::Regex;
use sift_config::model::{OutputConfig, ReasoningMode};
use sift_core::SiftError;

/// Strips reasoning-trace markup from backend output.
#[derive(Debug, Clone)]
pub struct ReasoningFilter {
    /// Matches a lone opening or closing tag, case-insensitively.
    tags: Regex,
    /// Matches a whole `<tag>...</tag>` block, when segments are dropped.
    segment: Option<Regex>,
}

impl ReasoningFilter {
    /// Builds a filter for `<tag>` markup.
    pub fn new(tag: &str, mode: ReasoningMode) -> Result<Self, SiftError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(SiftError::Config("reasoning tag must not be empty".into()));
        }
        let name = regex::escape(tag);

        let tags = Regex::new(&format!(r"(?i)</?{name}>"))
            .map_err(|e| SiftError::Config(format!("invalid reasoning tag `{tag}`: {e}")))?;
        let segment = match mode {
            ReasoningMode::Tags => None,
            ReasoningMode::Segment => Some(
                Regex::new(&format!(r"(?is)<{name}>.*?</{name}>"))
                    .map_err(|e| SiftError::Config(format!("invalid reasoning tag `{tag}`: {e}")))?,
            ),
        };

        Ok(Self { tags, segment })
    }

    /// Builds the filter described by the `[output]` section.
    pub fn from_config(config: &OutputConfig) -> Result<Self, SiftError> {
        Self::new(&config.reasoning_tag, config.reasoning_mode)
    }

    /// Removes reasoning markup from `raw` and trims the result.
    ///
    /// In segment mode, whole blocks go first; any unpaired tag left behind
    /// is then removed like in tags mode.
    pub fn clean(&self, raw: &str) -> String {
        let without_segments = match &self.segment {
            Some(segment) => segment.replace_all(raw, ""),
            None => raw.into(),
        };
        self.tags
            .replace_all(&without_segments, "")
            .trim()
            .to_string()
    }
}
