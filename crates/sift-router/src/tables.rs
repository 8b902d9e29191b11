// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phrase tables: flat lists of lowercase phrases the classifier matches against.

/// A list of lowercase phrases.
///
/// Tables are data: the classifier only asks whether a query contains one of
/// the phrases, or is exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseTable {
    phrases: Vec<String>,
}

impl PhraseTable {
    /// Builds a table, lowercasing and trimming every phrase and dropping blanks.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    /// First phrase that occurs as a substring of `lowercase_text`.
    ///
    /// The caller lowercases; matching is plain substring containment, so
    /// `"sport"` also matches `"transport"`.
    pub fn find_substring(&self, lowercase_text: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|p| lowercase_text.contains(p.as_str()))
            .map(String::as_str)
    }

    /// Whether `token` is exactly one of the phrases.
    pub fn contains(&self, token: &str) -> bool {
        self.phrases.iter().any(|p| p == token)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}
