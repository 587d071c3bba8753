//! Extension lifecycle
//!
//! [`Extension`] is the one object a host creates on activation and disposes
//! on deactivation. It owns the request queue, the status indicator and the
//! notification listener, and borrows nothing global: the host passes in its
//! session registry, its notifier and its workspace.
//!
//! The listener runs on its own thread and only sends [`ListenerEvent`]s; the
//! host calls [`Extension::pump_listener_events`] from its own loop so that
//! every queue mutation happens on the host thread.

mod commands;
mod notifier;


pub use commands::{NextOutcome, SessionReport};
pub use notifier::{LogNotifier, Notifier};

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use tracing::{error, info};

use crate::config::Config;
use crate::listener::{ListenerBinding, ListenerError, ListenerEvent, NotificationListener};
use crate::queue::{RequestQueue, SubscriptionId};
use crate::session::SessionRegistry;
use crate::status_bar::StatusIndicator;
use crate::workspace::WorkspaceResolver;

/// An activated host integration
pub struct Extension<S: SessionRegistry, N: Notifier> {
    config: Config,
    queue: RequestQueue,
    sessions: S,
    notifier: N,
    workspace: Option<PathBuf>,
    status: Rc<RefCell<StatusIndicator>>,
    listener: Option<NotificationListener>,
    events: Receiver<ListenerEvent>,
    listener_failed: bool,
}

impl<S: SessionRegistry, N: Notifier> Extension<S, N> {
    /// Create the queue, wire the status indicator and start the listener.
    ///
    /// A listener that cannot start is reported through the notifier once;
    /// the queue commands keep working without it.
    pub fn activate(
        config: Config,
        sessions: S,
        mut notifier: N,
        resolver: &dyn WorkspaceResolver,
    ) -> Self {
        info!("[tq:ext] Activating");

        let workspace = resolver.current_workspace_path();

        let (events_tx, events) = mpsc::channel();
        let listener = if config.listener.enabled {
            let started = config.listener.port_range().and_then(|range| {
                NotificationListener::start(
                    &config.listener.host,
                    range,
                    workspace.clone(),
                    events_tx,
                )
            });
            match started {
                Ok(listener) => {
                    notifier.info(&format!(
                        "Terminal queue active (port: {})",
                        listener.port()
                    ));
                    Some(listener)
                }
                Err(e) => {
                    report_listener_error(&mut notifier, &e);
                    None
                }
            }
        } else {
            info!("[tq:ext] Listener disabled by configuration");
            None
        };

        Self::assemble(config, sessions, notifier, workspace, listener, events)
    }

    /// Wire the queue to the status indicator around an already started listener.
    pub(crate) fn assemble(
        config: Config,
        sessions: S,
        notifier: N,
        workspace: Option<String>,
        listener: Option<NotificationListener>,
        events: Receiver<ListenerEvent>,
    ) -> Self {
        let mut queue = RequestQueue::new();
        let status = Rc::new(RefCell::new(StatusIndicator::new()));
        {
            let status = Rc::clone(&status);
            queue.subscribe(move |count| status.borrow_mut().update_queue_count(count));
        }

        Self {
            config,
            queue,
            sessions,
            notifier,
            workspace: workspace.map(PathBuf::from),
            status,
            listener,
            events,
            listener_failed: false,
        }
    }

    /// Apply every event the listener has sent since the last call.
    ///
    /// Returns the number of hook notifications that were handled.
    pub fn pump_listener_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.events.try_recv() {
                Ok(ListenerEvent::HookMatched { workspace }) => {
                    tracing::debug!("[tq:hook] Matched notification (workspace: {:?})", workspace);
                    self.add_request_from_hook();
                    handled += 1;
                }
                Ok(ListenerEvent::Failed(message)) => {
                    if !self.listener_failed {
                        self.listener_failed = true;
                        self.notifier
                            .error(&format!("HTTP listener error: {}", message));
                        // Not rebound: hooks stay unavailable until the next activation
                        if let Some(mut listener) = self.listener.take() {
                            listener.shutdown();
                        }
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        handled
    }

    /// Register an additional queue-length subscriber
    pub fn subscribe(&mut self, callback: impl FnMut(usize) + 'static) -> SubscriptionId {
        self.queue.subscribe(callback)
    }

    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut S {
        &mut self.sessions
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current state of the status indicator
    pub fn status(&self) -> StatusIndicator {
        self.status.borrow().clone()
    }

    pub fn listener_binding(&self) -> Option<&ListenerBinding> {
        self.listener.as_ref().map(|l| l.binding())
    }

    /// Release the listener socket and empty the queue.
    pub fn dispose(mut self) {
        if let Some(mut listener) = self.listener.take() {
            listener.shutdown();
        }
        self.queue.dispose();
        self.status.borrow_mut().hide();
        info!("[tq:ext] Deactivated");
    }
}

fn report_listener_error<N: Notifier>(notifier: &mut N, e: &ListenerError) {
    error!("[tq:http] Failed to start listener: {}", e);
    notifier.error(&format!("Failed to start HTTP listener: {}", e));
}
