// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query classification for Sift.
//!
//! This crate provides:
//! - [`QueryClassifier`]: rule-based routing of a query before any network call
//! - [`QueryHistory`]: the per-session record used for repeat detection
//! - [`RoutingDecision`]: the classifier's verdict and its canned reply
//!
//! The classifier inspects the query text, the session history, and the
//! caller's settings, and decides between refusing, answering from canned
//! text, redirecting to a search engine, or forwarding to the backend.

pub mod classifier;
pub mod decision;
pub mod history;
pub mod search;
pub mod tables;

pub use classifier::QueryClassifier;
pub use decision::RoutingDecision;
pub use history::QueryHistory;
pub use search::SearchTemplate;
pub use tables::PhraseTable;
