use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Question recorded when the source of a request does not supply one.
pub const DEFAULT_QUESTION: &str = "Input required";

/// Opaque handle of an interactive session.
///
/// The session itself is owned by the host's session registry; the queue only
/// keeps this identifier and never assumes the session is still alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// A session that is blocked waiting on user input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    /// Session awaiting input
    pub session: SessionId,

    /// What the session is asking for
    pub question: String,

    /// When the request was queued (diagnostics only)
    pub created_at: DateTime<Utc>,
}

impl PendingRequest {
    pub fn new(session: SessionId, question: Option<String>) -> Self {
        let question = question
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUESTION.to_string());

        Self {
            session,
            question,
            created_at: Utc::now(),
        }
    }

    /// Whole seconds since the request was queued
    pub fn age_secs(&self) -> i64 {
        (Utc::now() - self.created_at).num_seconds().max(0)
    }
}
