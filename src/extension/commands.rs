//! Host commands bound to the queue

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use super::{Extension, Notifier};
use crate::session::cwd::{detect_cwd, is_in_workspace};
use crate::session::SessionRegistry;
use crate::SessionId;

/// Name of the session opened by `simulate_request` when none is active
const TEST_SESSION_NAME: &str = "Test Terminal";

/// Result of [`Extension::next_in_queue`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// Nothing was waiting
    Empty,
    /// `session` was focused and removed from the queue
    Focused {
        session: SessionId,
        name: String,
        remaining: usize,
        skipped: Vec<SessionId>,
    },
    /// Only closed sessions were queued; they were all dropped
    Exhausted { skipped: Vec<SessionId> },
    /// The head could not be focused and stays queued
    FocusFailed {
        session: SessionId,
        skipped: Vec<SessionId>,
    },
}

/// One line of `debug_sessions` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub session: SessionId,
    pub name: String,
    pub pid: Option<u32>,
    pub cwd: Option<PathBuf>,
    pub in_workspace: bool,
}

impl<S: SessionRegistry, N: Notifier> Extension<S, N> {
    /// Focus the session at the head of the queue.
    ///
    /// Requests whose session has closed are dropped with a warning and the
    /// next one is tried. A request is only dequeued after its session has
    /// been focused.
    pub fn next_in_queue(&mut self) -> NextOutcome {
        if self.queue.is_empty() {
            self.notifier.info("No pending input requests.");
            return NextOutcome::Empty;
        }

        let mut skipped = Vec::new();
        while let Some(session) = self.queue.peek().map(|req| req.session) {
            let name = self.sessions.display_name(session);

            if !self.sessions.is_live(session) {
                self.queue.dequeue();
                self.notifier.warn(&format!(
                    "Terminal \"{}\" was closed. Moving to the next item.",
                    name
                ));
                skipped.push(session);
                continue;
            }

            if let Err(e) = self.sessions.focus(session) {
                warn!("[tq:ext] Failed to focus {}: {:#}", name, e);
                self.notifier
                    .error(&format!("Could not switch to \"{}\": {}", name, e));
                return NextOutcome::FocusFailed { session, skipped };
            }

            self.queue.dequeue();
            let remaining = self.queue.len();
            if remaining > 0 {
                self.notifier.info(&format!(
                    "Moved to {}. ({} still waiting)",
                    name, remaining
                ));
            } else {
                self.notifier.info(&format!("Moved to {}.", name));
            }
            info!("[tq:ext] Focused terminal: {}", name);

            return NextOutcome::Focused {
                session,
                name,
                remaining,
                skipped,
            };
        }

        NextOutcome::Exhausted { skipped }
    }

    /// Queue the active session (or a fresh test session) with a random question.
    pub fn simulate_request(&mut self) -> Result<SessionId> {
        let session = match self.sessions.active_session() {
            Some(session) => session,
            None => self.sessions.open_session(TEST_SESSION_NAME)?,
        };

        let questions = &self.config.queue.simulated_questions;
        let question = match questions.len() {
            0 => None,
            n => questions.get(random_index(n)).cloned(),
        };

        if self.queue.enqueue(session, question) {
            let shown = self
                .queue
                .iter()
                .last()
                .map(|req| req.question.clone())
                .unwrap_or_default();
            self.notifier.info(&format!(
                "Input request added: \"{}\" (total {})",
                shown,
                self.queue.len()
            ));
        } else {
            self.notifier.info(&format!(
                "\"{}\" is already waiting for input (total {})",
                self.sessions.display_name(session),
                self.queue.len()
            ));
        }
        Ok(session)
    }

    /// Empty the queue after the user confirms. Returns how many requests were dropped.
    pub fn clear_queue(&mut self) -> usize {
        let count = self.queue.len();
        if count == 0 {
            self.notifier.info("The queue is already empty.");
            return 0;
        }

        let confirmed = self.notifier.confirm(
            &format!("Delete all {} pending requests?", count),
            "Delete",
        );
        if !confirmed {
            return 0;
        }

        self.queue.clear();
        self.notifier
            .info(&format!("{} request(s) deleted.", count));
        count
    }

    /// Queue the active session on behalf of a hook.
    ///
    /// Never shows anything to the user: without an active session the
    /// notification is dropped and only logged.
    pub fn add_request_from_hook(&mut self) -> bool {
        let Some(session) = self.sessions.active_session() else {
            debug!("[tq:hook] No active terminal, ignoring");
            return false;
        };

        let question = self.config.queue.hook_question.clone();
        let added = self.queue.enqueue(session, Some(question));
        info!(
            "[tq:hook] {} {} (total {})",
            if added { "Queued" } else { "Already queued:" },
            self.sessions.display_name(session),
            self.queue.len()
        );
        added
    }

    /// Drop the request of a session the host has closed.
    pub fn on_session_closed(&mut self, session: SessionId) -> bool {
        let removed = self.queue.remove(session);
        if removed {
            info!(
                "[tq:ext] Terminal closed, removed from queue: {}",
                self.sessions.display_name(session)
            );
        }
        removed
    }

    /// Describe every open session: process, working directory and whether it
    /// belongs to the current workspace.
    pub fn debug_sessions(&self) -> Vec<SessionReport> {
        let reports: Vec<SessionReport> = self
            .sessions
            .list_sessions()
            .into_iter()
            .map(|session| {
                let pid = self.sessions.process_id(session);
                let cwd = pid.and_then(detect_cwd);
                let in_workspace = match (&cwd, &self.workspace) {
                    (Some(cwd), Some(ws)) => is_in_workspace(cwd, ws),
                    _ => false,
                };
                SessionReport {
                    session,
                    name: self.sessions.display_name(session),
                    pid,
                    cwd,
                    in_workspace,
                }
            })
            .collect();

        info!("[tq:ext] {} terminal(s)", reports.len());
        for report in &reports {
            info!(
                "[tq:ext] {} pid={:?} cwd={} in_workspace={}",
                report.name,
                report.pid,
                report
                    .cwd
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                report.in_workspace
            );
        }
        reports
    }

    /// Formatted queue listing
    pub fn queue_report(&self) -> String {
        self.queue
            .debug_report(|session| self.sessions.display_name(session))
    }
}

fn random_index(len: usize) -> usize {
    let mut bytes = [0u8; 8];
    if getrandom::getrandom(&mut bytes).is_err() {
        return 0;
    }
    (u64::from_le_bytes(bytes) % len as u64) as usize
}
