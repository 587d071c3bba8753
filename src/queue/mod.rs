//! FIFO queue of sessions waiting on user input
//!
//! The queue holds at most one [`PendingRequest`] per session and notifies its
//! subscribers synchronously whenever its length changes. It is owned by the
//! host thread and has no internal locking.

use std::collections::VecDeque;
use std::fmt::Write as _;

use tracing::{debug, info};

use crate::{PendingRequest, SessionId};

#[cfg(test)]
mod tests;

/// Handle returned by [`RequestQueue::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type LengthCallback = Box<dyn FnMut(usize)>;

/// Ordered, deduplicated collection of pending input requests
#[derive(Default)]
pub struct RequestQueue {
    requests: VecDeque<PendingRequest>,
    subscribers: Vec<(SubscriptionId, LengthCallback)>,
    next_subscription: u64,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback receiving the new length after every change.
    pub fn subscribe(&mut self, callback: impl FnMut(usize) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        before != self.subscribers.len()
    }

    fn notify(&mut self) {
        let len = self.requests.len();
        for (_, callback) in self.subscribers.iter_mut() {
            callback(len);
        }
    }

    /// Queue a request for `session` unless one is already pending.
    ///
    /// Returns true if the request was added.
    pub fn enqueue(&mut self, session: SessionId, question: Option<String>) -> bool {
        if self.contains(session) {
            debug!("[tq:queue] {} already queued, ignoring", session);
            return false;
        }

        let request = PendingRequest::new(session, question);
        info!(
            "[tq:queue] Added: {} - \"{}\" (total {})",
            session,
            request.question,
            self.requests.len() + 1
        );
        self.requests.push_back(request);
        self.notify();
        true
    }

    /// Head of the queue without removing it
    pub fn peek(&self) -> Option<&PendingRequest> {
        self.requests.front()
    }

    /// Remove and return the head.
    ///
    /// Subscribers are notified even when the queue was already empty.
    pub fn dequeue(&mut self) -> Option<PendingRequest> {
        let request = self.requests.pop_front();

        if let Some(ref req) = request {
            info!(
                "[tq:queue] Handled: {} - \"{}\" (remaining {})",
                req.session,
                req.question,
                self.requests.len()
            );
        }

        self.notify();
        request
    }

    /// Remove every request for `session`.
    pub fn remove(&mut self, session: SessionId) -> bool {
        let before = self.requests.len();
        self.requests.retain(|req| req.session != session);

        let removed = before != self.requests.len();
        if removed {
            info!(
                "[tq:queue] Removed: {} (remaining {})",
                session,
                self.requests.len()
            );
            self.notify();
        }
        removed
    }

    pub fn clear(&mut self) {
        let count = self.requests.len();
        self.requests.clear();

        if count > 0 {
            info!("[tq:queue] Cleared {} request(s)", count);
            self.notify();
        }
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn contains(&self, session: SessionId) -> bool {
        self.requests.iter().any(|req| req.session == session)
    }

    /// Requests in dequeue order
    pub fn iter(&self) -> impl Iterator<Item = &PendingRequest> {
        self.requests.iter()
    }

    /// Human-readable listing of the queue with the age of each request.
    ///
    /// `name` resolves a session to its display name.
    pub fn debug_report(&self, name: impl Fn(SessionId) -> String) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Queue Status ===");
        let _ = writeln!(out, "Total: {}", self.requests.len());
        for (index, req) in self.requests.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} - \"{}\" ({}s ago)",
                index + 1,
                name(req.session),
                req.question,
                req.age_secs()
            );
        }
        let _ = write!(out, "====================");
        out
    }

    /// Empty the queue and drop all subscribers without notifying them.
    pub fn dispose(&mut self) {
        self.requests.clear();
        self.subscribers.clear();
    }
}

impl std::fmt::Debug for RequestQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestQueue")
            .field("requests", &self.requests)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
