//! Interactive sessions as seen by the queue
//!
//! The host owns its terminals; the queue only needs to ask whether a session
//! still exists, bring it to the front and name it in messages.
//! [`SessionRegistry`] is that seam. [`LocalSessions`] is an in-memory
//! registry used by the console host and in tests.

pub mod cwd;
mod local;


pub use local::{LocalSession, LocalSessions};

use anyhow::Result;

use crate::SessionId;

/// The host's view of its interactive sessions
pub trait SessionRegistry {
    /// All sessions currently open
    fn list_sessions(&self) -> Vec<SessionId>;

    /// Whether `session` is still open
    fn is_live(&self, session: SessionId) -> bool;

    /// Bring `session` to the front without sending it any input
    fn focus(&mut self, session: SessionId) -> Result<()>;

    /// Name shown to the user
    fn display_name(&self, session: SessionId) -> String;

    /// Session that currently has focus, used to attribute hook notifications
    fn active_session(&self) -> Option<SessionId>;

    /// Open a new session named `name`
    fn open_session(&mut self, name: &str) -> Result<SessionId>;

    /// Shell process of `session`, if known
    fn process_id(&self, _session: SessionId) -> Option<u32> {
        None
    }
}
