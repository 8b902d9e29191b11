// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat session: the unit of history, transcript, and in-flight tracking.
//!
//! A session goes Idle -> Awaiting -> Idle for every submitted query. Only
//! one query may be awaiting a response at a time; a second submission is
//! rejected with [`SiftError::SessionBusy`] rather than queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sift_core::{QueryResponse, SessionId, Settings, SiftError};
use sift_router::QueryHistory;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::dispatcher::Dispatcher;

/// States a session moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Ready for the next query.
    Idle,
    /// A query is being answered.
    Awaiting,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Awaiting => write!(f, "awaiting"),
        }
    }
}

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One displayed chat message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub content: String,
    /// Search link shown under redirect replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    fn user(content: &str) -> Self {
        Self {
            sender: Sender::User,
            content: content.to_string(),
            redirect_url: None,
            timestamp: Utc::now(),
        }
    }

    fn assistant(response: &QueryResponse) -> Self {
        Self {
            sender: Sender::Assistant,
            content: response.content().to_string(),
            redirect_url: response.redirect_url().map(str::to_string),
            timestamp: Utc::now(),
        }
    }
}

/// Everything a "New Chat" throws away.
#[derive(Debug)]
struct Conversation {
    id: SessionId,
    history: QueryHistory,
    transcript: Vec<TranscriptEntry>,
}

impl Conversation {
    fn fresh() -> Self {
        Self {
            id: SessionId(uuid::Uuid::new_v4().to_string()),
            history: QueryHistory::new(),
            transcript: Vec::new(),
        }
    }
}

/// Marks the session busy for as long as it lives.
///
/// Dropping the guard (including when the owning future is cancelled)
/// returns the session to idle.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, SiftError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self { flag })
            .map_err(|_| SiftError::SessionBusy)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A single conversation with its own query history.
pub struct ChatSession {
    dispatcher: Arc<Dispatcher>,
    conversation: Mutex<Conversation>,
    busy: AtomicBool,
}

impl ChatSession {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        let conversation = Conversation::fresh();
        info!(session_id = %conversation.id, "session started");
        Self {
            dispatcher,
            conversation: Mutex::new(conversation),
            busy: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.busy.load(Ordering::Acquire) {
            SessionState::Awaiting
        } else {
            SessionState::Idle
        }
    }

    pub async fn session_id(&self) -> SessionId {
        self.conversation.lock().await.id.clone()
    }

    /// Snapshot of the displayed messages, oldest first.
    pub async fn transcript(&self) -> Vec<TranscriptEntry> {
        self.conversation.lock().await.transcript.clone()
    }

    /// Number of queries recorded for repeat detection.
    pub async fn history_len(&self) -> usize {
        self.conversation.lock().await.history.len()
    }

    /// Starts a new chat: fresh id, empty history and transcript.
    ///
    /// Fails with [`SiftError::SessionBusy`] while a query is awaiting.
    pub async fn reset(&self) -> Result<SessionId, SiftError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        let mut conversation = self.conversation.lock().await;
        let previous = std::mem::replace(&mut *conversation, Conversation::fresh());
        info!(
            previous = %previous.id,
            session_id = %conversation.id,
            "session reset"
        );
        Ok(conversation.id.clone())
    }

    /// Submits one user query and waits for the reply.
    ///
    /// Backend failures never surface here: they arrive as the fallback
    /// reply. Errors are limited to blank input, out-of-range settings, and
    /// a query already in flight.
    pub async fn submit_query(
        &self,
        text: &str,
        settings: &Settings,
    ) -> Result<QueryResponse, SiftError> {
        if text.trim().is_empty() {
            return Err(SiftError::InvalidInput("query must not be empty".into()));
        }
        settings
            .validate()
            .map_err(|e| SiftError::InvalidInput(e.to_string()))?;

        let _guard = BusyGuard::acquire(&self.busy)?;
        let decision = {
            let mut conversation = self.conversation.lock().await;
            debug!(session_id = %conversation.id, "query submitted");
            self.dispatcher.route(text, &mut conversation.history, settings)
        };

        // Lock released across the backend call; entries are pushed as a pair.
        let response = self.dispatcher.answer(decision).await;
        let mut conversation = self.conversation.lock().await;
        conversation.transcript.push(TranscriptEntry::user(text));
        conversation
            .transcript
            .push(TranscriptEntry::assistant(&response));

        Ok(response)
    }
}
