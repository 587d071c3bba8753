//! In-memory session registry

use std::collections::BTreeMap;

use anyhow::{bail, Result};

use super::SessionRegistry;
use crate::SessionId;

/// A session tracked by [`LocalSessions`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSession {
    pub id: SessionId,
    pub name: String,
    pub pid: Option<u32>,
}

/// Session registry kept entirely in memory
#[derive(Debug)]
pub struct LocalSessions {
    sessions: BTreeMap<SessionId, LocalSession>,
    active: Option<SessionId>,
    next_id: u64,
}

impl LocalSessions {
    pub fn new() -> Self {
        Self {
            sessions: BTreeMap::new(),
            active: None,
            next_id: 1,
        }
    }

    /// Register a session and make it the active one
    pub fn open(&mut self, name: impl Into<String>, pid: Option<u32>) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.sessions.insert(
            id,
            LocalSession {
                id,
                name: name.into(),
                pid,
            },
        );
        self.active = Some(id);
        id
    }

    /// Forget a session. The active session is cleared if it was this one.
    pub fn close(&mut self, id: SessionId) -> Option<LocalSession> {
        let removed = self.sessions.remove(&id);
        if self.active == Some(id) {
            self.active = None;
        }
        removed
    }

    pub fn get(&self, id: SessionId) -> Option<&LocalSession> {
        self.sessions.get(&id)
    }

    /// Find a session by exact name
    pub fn find(&self, name: &str) -> Option<SessionId> {
        self.sessions
            .values()
            .find(|s| s.name == name)
            .map(|s| s.id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for LocalSessions {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry for LocalSessions {
    fn list_sessions(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    fn is_live(&self, session: SessionId) -> bool {
        self.sessions.contains_key(&session)
    }

    fn focus(&mut self, session: SessionId) -> Result<()> {
        if !self.sessions.contains_key(&session) {
            bail!("Session {} is not open", session);
        }
        self.active = Some(session);
        Ok(())
    }

    fn display_name(&self, session: SessionId) -> String {
        self.sessions
            .get(&session)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| session.to_string())
    }

    fn active_session(&self) -> Option<SessionId> {
        self.active
    }

    fn open_session(&mut self, name: &str) -> Result<SessionId> {
        Ok(self.open(name, None))
    }

    fn process_id(&self, session: SessionId) -> Option<u32> {
        self.sessions.get(&session).and_then(|s| s.pid)
    }
}
