//! Loopback HTTP listener for hook notifications
//!
//! Hooks running outside the host signal "a session in workspace W needs
//! input" by posting to `POST /addRequest` on one of a small range of ports.
//! Every host process binds the first free port of that range, so several
//! hosts (one per open workspace) can run side by side; each one only accepts
//! notifications for its own workspace and answers `SKIP` to the rest.
//!
//! The listener never touches the request queue. Matched notifications are
//! forwarded as [`ListenerEvent`]s over a channel that the host drains on its
//! own thread.

mod error;
pub mod form;
mod handlers;
mod ports;

#[cfg(test)]
mod tests;

pub use error::ListenerError;
pub use handlers::{decide, HookDecision, ADD_REQUEST_PATH, BODY_ACCEPTED, BODY_SKIPPED};
pub use ports::{
    bind_first_available, free_ports, PortRange, DEFAULT_PORT_BASE, DEFAULT_PORT_SPAN,
};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tiny_http::Server;
use tracing::{error, info};

use handlers::{handle_request, HandlerContext};

/// Message from the listener thread to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    /// A hook for this workspace asked for the active session to be queued
    HookMatched { workspace: Option<String> },
    /// The listener stopped serving without being asked to
    Failed(String),
}

/// Where the listener is bound and which workspace it answers for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerBinding {
    pub host: String,
    pub port: u16,
    pub workspace: Option<String>,
}

impl ListenerBinding {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Running notification listener.
///
/// Dropping the listener releases the socket.
pub struct NotificationListener {
    binding: ListenerBinding,
    server: Option<Arc<Server>>,
    stopping: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl NotificationListener {
    /// Bind the first free port in `range` and start serving in a background thread.
    pub fn start(
        host: &str,
        range: PortRange,
        workspace: Option<String>,
        events: Sender<ListenerEvent>,
    ) -> Result<Self, ListenerError> {
        let (server, port) = bind_first_available(host, range)?;
        let server = Arc::new(server);
        let stopping = Arc::new(AtomicBool::new(false));

        let binding = ListenerBinding {
            host: host.to_string(),
            port,
            workspace,
        };

        let ctx = HandlerContext {
            workspace: binding.workspace.clone(),
            events,
        };
        let thread = {
            let server = Arc::clone(&server);
            let stopping = Arc::clone(&stopping);
            thread::Builder::new()
                .name(format!("tq-listener-{}", port))
                .spawn(move || serve(&server, &ctx, &stopping))?
        };

        info!(
            "[tq:http] Listening on {} (workspace: {})",
            binding.url(),
            binding.workspace.as_deref().unwrap_or("No Workspace")
        );

        Ok(Self {
            binding,
            server: Some(server),
            stopping,
            thread: Some(thread),
        })
    }

    pub fn binding(&self) -> &ListenerBinding {
        &self.binding
    }

    pub fn port(&self) -> u16 {
        self.binding.port
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop accepting requests and release the socket.
    ///
    /// In-flight requests are not drained. Calling this twice is a no-op.
    pub fn shutdown(&mut self) {
        let Some(server) = self.server.take() else {
            return;
        };

        self.stopping.store(true, Ordering::SeqCst);
        server.unblock();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("[tq:http] Listener thread panicked");
            }
        }
        // Last reference: dropping the server closes the socket
        drop(server);
        info!("[tq:http] Stopped listening on {}", self.binding.url());
    }
}

impl Drop for NotificationListener {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for NotificationListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationListener")
            .field("binding", &self.binding)
            .field("running", &self.is_running())
            .finish()
    }
}

fn serve(server: &Server, ctx: &HandlerContext, stopping: &AtomicBool) {
    for request in server.incoming_requests() {
        handle_request(ctx, request);
    }

    if !stopping.load(Ordering::SeqCst) {
        let message = "listener stopped accepting connections".to_string();
        error!("[tq:http] {}", message);
        let _ = ctx.events.send(ListenerEvent::Failed(message));
    }
}
