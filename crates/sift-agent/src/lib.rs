// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query dispatch and chat sessions for Sift.
//!
//! - [`Dispatcher`]: classifies a query and either answers it locally or
//!   forwards it to the inference backend, folding backend failures into a
//!   fallback reply.
//! - [`ReasoningFilter`]: strips reasoning-trace markup from backend output.
//! - [`ChatSession`]: owns one conversation's history and transcript and
//!   allows a single query in flight.

pub mod dispatcher;
pub mod postprocess;
pub mod session;

pub use dispatcher::{Dispatcher, FALLBACK_MESSAGE};
pub use postprocess::ReasoningFilter;
pub use session::{ChatSession, Sender, SessionState, TranscriptEntry};
