//! Session store: per-session accumulated text buffers.
//!
//! Each session is an independent append-only text buffer identified by a
//! `SessionId`. Sessions are created lazily on first `feed`/`submit` and
//! persist only for the engine's lifetime — there is no cross-restart
//! persistence.

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::types::SessionId;

#[derive(Default)]
pub struct SessionStore {
    buffers: RwLock<HashMap<SessionId, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` to the session's buffer, creating the session if it
    /// doesn't yet exist. Returns the buffer's new contents. Raw
    /// concatenation — the caller's deltas already carry whatever
    /// whitespace belongs between them.
    pub fn append(&self, session: &SessionId, text: &str) -> String {
        let mut buffers = self.buffers.write();
        let buffer = buffers.entry(session.clone()).or_default();
        buffer.push_str(text);
        buffer.clone()
    }

    /// Replace the session's entire buffer, creating the session if needed.
    pub fn replace(&self, session: &SessionId, text: &str) -> String {
        let mut buffers = self.buffers.write();
        buffers.insert(session.clone(), text.to_string());
        text.to_string()
    }

    /// Current buffer contents, or `None` if the session doesn't exist.
    pub fn get(&self, session: &SessionId) -> Option<String> {
        self.buffers.read().get(session).cloned()
    }

    /// Fetch the buffer, creating an empty session if it doesn't exist.
    pub fn get_or_create(&self, session: &SessionId) -> String {
        let mut buffers = self.buffers.write();
        buffers.entry(session.clone()).or_default().clone()
    }

    /// Clear a session's buffer. Resetting an unknown session is a no-op,
    /// not an error — it simply leaves nothing to reset.
    pub fn remove(&self, session: &SessionId) {
        self.buffers.write().remove(session);
    }

    pub fn session_count(&self) -> usize {
        self.buffers.read().len()
    }
}
