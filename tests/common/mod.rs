//! Shared test utilities for host integration tests

#![allow(dead_code)]

use anyhow::{bail, Result};

use terminal_queue::config::Config;
use terminal_queue::extension::Notifier;
use terminal_queue::session::{LocalSessions, SessionRegistry};
use terminal_queue::SessionId;

/// A message shown through the notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Info(String),
    Warn(String),
    Error(String),
    Confirm(String),
}

/// Notifier that records every message
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub shown: Vec<Shown>,
    pub answer: bool,
}

impl RecordingNotifier {
    pub fn answering(answer: bool) -> Self {
        Self {
            shown: Vec::new(),
            answer,
        }
    }

    pub fn errors(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Error(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Warn(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_info(&self) -> Option<&str> {
        self.shown.iter().rev().find_map(|s| match s {
            Shown::Info(m) => Some(m.as_str()),
            _ => None,
        })
    }
}

impl Notifier for RecordingNotifier {
    fn info(&mut self, message: &str) {
        self.shown.push(Shown::Info(message.to_string()));
    }

    fn warn(&mut self, message: &str) {
        self.shown.push(Shown::Warn(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.shown.push(Shown::Error(message.to_string()));
    }

    fn confirm(&mut self, message: &str, _accept_label: &str) -> bool {
        self.shown.push(Shown::Confirm(message.to_string()));
        self.answer
    }
}

/// Session registry whose focus can be made to fail
#[derive(Debug, Default)]
pub struct StubbornSessions {
    pub inner: LocalSessions,
    pub refuse_focus: bool,
}

impl SessionRegistry for StubbornSessions {
    fn list_sessions(&self) -> Vec<SessionId> {
        self.inner.list_sessions()
    }

    fn is_live(&self, session: SessionId) -> bool {
        self.inner.is_live(session)
    }

    fn focus(&mut self, session: SessionId) -> Result<()> {
        if self.refuse_focus {
            bail!("window manager refused");
        }
        self.inner.focus(session)
    }

    fn display_name(&self, session: SessionId) -> String {
        self.inner.display_name(session)
    }

    fn active_session(&self) -> Option<SessionId> {
        self.inner.active_session()
    }

    fn open_session(&mut self, name: &str) -> Result<SessionId> {
        self.inner.open_session(name)
    }
}

/// Config with the listener turned off
pub fn offline_config() -> Config {
    let mut config = Config::default();
    config.listener.enabled = false;
    config
}

/// Config with the listener on a test-specific port range
pub fn listener_config(port_base: u16, port_span: u16) -> Config {
    let mut config = Config::default();
    config.listener.port_base = port_base;
    config.listener.port_span = port_span;
    config
}
