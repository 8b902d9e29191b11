// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Sift integration tests.
//!
//! Provides a mock inference backend and a harness that wires it into a
//! real dispatcher and chat session, so tests run without an Ollama server.
//!
//! # Components
//!
//! - [`MockBackend`] - Mock inference backend with scripted replies
//! - [`TestHarness`] - Dispatcher and session assembled over a `MockBackend`
//! - [`closed_port_url`] - Base URL that refuses connections

pub mod harness;
pub mod mock_backend;
pub mod network;

pub use harness::TestHarness;
pub use mock_backend::{MockBackend, MockReply};
pub use network::closed_port_url;
