//! # Conversation Store
//!
//! Named chat sessions, each an append-only message log.
//!
//! ## Ordering
//!
//! ```text
//! sessions: [newest, ..., oldest]   (new sessions are prepended)
//! active:   Option<SessionId>        (at most one)
//! ```
//!
//! Sessions are never deleted. When nothing is active and sessions exist, the
//! most recent one is selected.
//!
//! ## Dispatch Bookkeeping
//!
//! Each session carries a dispatch slot: the latest sequence number handed out
//! and whether that dispatch is still in flight. [`InFlightGuard`] owns the
//! flag for the duration of one dispatch and releases it on drop.

use chrono::{DateTime, Utc};
use lib_core::{AppError, Result};
use parking_lot::RwLock;
use shared::dto::chat::ChatMessage;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub type SessionId = String;

/// Placeholder title for sessions created without user input.
pub const NEW_CHAT_TITLE: &str = "New Chat";

/// One chat conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Default, Clone, Copy)]
struct DispatchSlot {
    latest_seq: u64,
    in_flight: bool,
}

#[derive(Debug, Default)]
pub struct ConversationStore {
    sessions: Vec<Session>,
    active: Option<SessionId>,
    dispatch: HashMap<SessionId, DispatchSlot>,
}

/// Store handle shared between the REPL and dispatch tasks.
pub type SharedConversations = Arc<RwLock<ConversationStore>>;

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedConversations {
        Arc::new(RwLock::new(Self::new()))
    }

    // region: --- Sessions

    /// Create a session and prepend it to the list.
    ///
    /// The new session becomes active only if nothing was active.
    pub fn create_session(&mut self, title: impl Into<String>) -> SessionId {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            created_at: Utc::now(),
            messages: Vec::new(),
        };
        let id = session.id.clone();

        tracing::debug!("[CHAT] Created session {} '{}'", id, session.title);
        self.sessions.insert(0, session);
        self.ensure_selection();
        id
    }

    /// Create a "New Chat" session and make it active.
    pub fn new_chat(&mut self) -> SessionId {
        let id = self.create_session(NEW_CHAT_TITLE);
        self.active = Some(id.clone());
        id
    }

    /// Return the active session id, creating one titled `title` if none is active.
    pub fn ensure_active(&mut self, title: &str) -> SessionId {
        match &self.active {
            Some(id) => id.clone(),
            None => {
                let id = self.create_session(title);
                self.active = Some(id.clone());
                id
            }
        }
    }

    pub fn append_message(&mut self, session_id: &str, message: ChatMessage) -> Result<()> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| AppError::UnknownSession(session_id.to_string()))?;

        session.messages.push(message);
        Ok(())
    }

    /// Make `session_id` active. Selecting the active session again is a no-op.
    pub fn select_session(&mut self, session_id: &str) -> Result<()> {
        if !self.sessions.iter().any(|s| s.id == session_id) {
            return Err(AppError::UnknownSession(session_id.to_string()));
        }
        self.active = Some(session_id.to_string());
        Ok(())
    }

    /// Sessions, most recently created first.
    pub fn list_sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.active.as_deref().and_then(|id| self.session(id))
    }

    fn ensure_selection(&mut self) {
        if self.active.is_none() {
            self.active = self.sessions.first().map(|s| s.id.clone());
        }
    }

    // endregion: --- Sessions

    // region: --- Dispatch

    /// Hand out the next sequence number for `session_id` and mark it in flight.
    fn begin_dispatch(&mut self, session_id: &str) -> Result<u64> {
        if self.session(session_id).is_none() {
            return Err(AppError::UnknownSession(session_id.to_string()));
        }

        let slot = self.dispatch.entry(session_id.to_string()).or_default();
        if slot.in_flight {
            return Err(AppError::DispatchInProgress(session_id.to_string()));
        }

        slot.latest_seq += 1;
        slot.in_flight = true;
        Ok(slot.latest_seq)
    }

    /// Clear the in-flight flag if `seq` is still the latest dispatch.
    fn finish_dispatch(&mut self, session_id: &str, seq: u64) {
        if let Some(slot) = self.dispatch.get_mut(session_id) {
            if slot.latest_seq == seq {
                slot.in_flight = false;
            }
        }
    }

    /// Abandon the in-flight dispatch of `session_id`.
    ///
    /// Its reply will be discarded when it arrives and the session accepts a
    /// new dispatch immediately. Returns `false` when nothing was in flight.
    pub fn supersede_dispatch(&mut self, session_id: &str) -> bool {
        match self.dispatch.get_mut(session_id) {
            Some(slot) if slot.in_flight => {
                slot.latest_seq += 1;
                slot.in_flight = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_latest(&self, session_id: &str, seq: u64) -> bool {
        self.dispatch
            .get(session_id)
            .is_some_and(|slot| slot.latest_seq == seq)
    }

    pub fn is_sending(&self, session_id: &str) -> bool {
        self.dispatch.get(session_id).is_some_and(|slot| slot.in_flight)
    }

    // endregion: --- Dispatch
}

/// Holds a session's in-flight flag for one dispatch.
#[derive(Debug)]
pub struct InFlightGuard {
    store: SharedConversations,
    session_id: SessionId,
    seq: u64,
}

impl InFlightGuard {
    /// Fails with `DispatchInProgress` if the session already has a dispatch in flight.
    pub fn acquire(store: &SharedConversations, session_id: &str) -> Result<Self> {
        let seq = store.write().begin_dispatch(session_id)?;
        Ok(Self {
            store: store.clone(),
            session_id: session_id.to_string(),
            seq,
        })
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Whether no newer dispatch has superseded this one.
    pub fn is_current(&self) -> bool {
        self.store.read().is_latest(&self.session_id, self.seq)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.store.write().finish_dispatch(&self.session_id, self.seq);
    }
}
