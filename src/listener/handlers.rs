//! Request routing for the notification endpoint

use std::io::Cursor;
use std::sync::mpsc::Sender;

use tiny_http::{Header, Request, Response};
use tracing::{error, info, warn};

use super::form::form_value;
use super::ListenerEvent;
use crate::workspace::is_workspace_match;

/// Path accepted by the listener
pub const ADD_REQUEST_PATH: &str = "/addRequest";

/// Body sent when the notification was accepted
pub const BODY_ACCEPTED: &str = "OK";

/// Body sent when the notification belongs to another workspace
pub const BODY_SKIPPED: &str = "SKIP";

const BODY_NOT_FOUND: &str = "Not Found";

/// Outcome of a hook notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookDecision {
    Accepted,
    Skipped,
}

impl HookDecision {
    pub fn body(self) -> &'static str {
        match self {
            HookDecision::Accepted => BODY_ACCEPTED,
            HookDecision::Skipped => BODY_SKIPPED,
        }
    }
}

/// Decide a hook notification from its form body.
pub fn decide(body: &str, current_workspace: Option<&str>) -> HookDecision {
    let requested = form_value(body, "workspace");
    if is_workspace_match(requested.as_deref(), current_workspace) {
        HookDecision::Accepted
    } else {
        HookDecision::Skipped
    }
}

/// Shared state of the serving thread
pub(super) struct HandlerContext {
    pub workspace: Option<String>,
    pub events: Sender<ListenerEvent>,
}

pub(super) fn handle_request(ctx: &HandlerContext, mut request: Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();
    // Routing looks at the path only, so hooks may append a query string
    let path = url.split('?').next().unwrap_or(url.as_str());

    let response = match (method.as_str(), path) {
        ("POST", ADD_REQUEST_PATH) => {
            let decision = match read_request_body(&mut request) {
                Ok(body) => handle_add_request(ctx, &body),
                Err(e) => {
                    warn!("[tq:http] Failed to read body: {}", e);
                    HookDecision::Skipped
                }
            };
            text_response(200, decision.body())
        }
        _ => text_response(404, BODY_NOT_FOUND),
    };

    if let Err(e) = request.respond(response) {
        warn!("[tq:http] Failed to send response for {} {}: {}", method, path, e);
    }
}

fn handle_add_request(ctx: &HandlerContext, body: &str) -> HookDecision {
    let requested = form_value(body, "workspace");
    info!(
        "[tq:http] Hook received - requested: {:?}, current: {}",
        requested,
        ctx.workspace.as_deref().unwrap_or("No Workspace")
    );

    let decision = decide(body, ctx.workspace.as_deref());
    match decision {
        HookDecision::Accepted => {
            info!("[tq:http] Workspace matched, forwarding to queue");
            if let Err(e) = ctx.events.send(ListenerEvent::HookMatched {
                workspace: requested,
            }) {
                error!("[tq:http] Failed to forward hook to host: {}", e);
            }
        }
        HookDecision::Skipped => {
            info!("[tq:http] Workspace mismatch, skipping");
        }
    }
    decision
}

/// Buffer the whole request body.
fn read_request_body(request: &mut Request) -> std::io::Result<String> {
    let mut raw = Vec::new();
    request.as_reader().read_to_end(&mut raw)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn header(field: &str, value: &str) -> Option<Header> {
    Header::from_bytes(field.as_bytes(), value.as_bytes()).ok()
}

/// Plain-text response; `from_string` already sets `Content-Type: text/plain`.
fn text_response(status_code: u16, body: &str) -> Response<Cursor<Vec<u8>>> {
    let mut response = Response::from_string(body).with_status_code(status_code);
    if let Some(cors) = header("Access-Control-Allow-Origin", "*") {
        response.add_header(cors);
    }
    response
}
