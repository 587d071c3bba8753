//! Client side of the hook protocol.
//!
//! A hook does not know which port the host for its workspace bound, so it
//! posts to every candidate port in turn until one accepts. Hosts for other
//! workspaces answer `SKIP`; free ports refuse the connection.

use std::time::Duration;

use tracing::debug;

use crate::listener::form::encode_component;
use crate::listener::{PortRange, ADD_REQUEST_PATH, BODY_ACCEPTED, BODY_SKIPPED};

/// What a single port answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The host for this workspace queued the request
    Accepted,
    /// A host for another workspace declined
    Skipped,
    /// Something answered but does not serve the endpoint
    NotFound,
    /// Answered with a body this client does not understand
    Unexpected(String),
    /// Nothing reachable on this port
    Unreachable(String),
}

/// Delivery result for one port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortReport {
    pub port: u16,
    pub delivery: Delivery,
}

/// Sends hook notifications to the hosts listening on a port range
#[derive(Clone)]
pub struct HookClient {
    host: String,
    range: PortRange,
    client: ureq::Agent,
}

impl HookClient {
    pub fn new(host: impl Into<String>, range: PortRange) -> Self {
        let client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_millis(500))
            .timeout_read(Duration::from_secs(2))
            .build();

        Self {
            host: host.into(),
            range,
            client,
        }
    }

    pub fn range(&self) -> PortRange {
        self.range
    }

    /// Post one notification to `port`.
    pub fn post(&self, port: u16, workspace: Option<&str>) -> Delivery {
        let url = format!("http://{}:{}{}", self.host, port, ADD_REQUEST_PATH);
        let body = form_body(workspace);

        let result = self
            .client
            .post(&url)
            .set("Content-Type", "application/x-www-form-urlencoded")
            .send_string(&body);

        let delivery = match result {
            Ok(response) => match response.into_string() {
                Ok(text) if text.trim() == BODY_ACCEPTED => Delivery::Accepted,
                Ok(text) if text.trim() == BODY_SKIPPED => Delivery::Skipped,
                Ok(text) => Delivery::Unexpected(text),
                Err(e) => Delivery::Unexpected(e.to_string()),
            },
            Err(ureq::Error::Status(404, _)) => Delivery::NotFound,
            Err(ureq::Error::Status(code, _)) => Delivery::Unexpected(format!("HTTP {}", code)),
            Err(ureq::Error::Transport(e)) => Delivery::Unreachable(e.to_string()),
        };

        debug!("[tq:hook] {} -> {:?}", url, delivery);
        delivery
    }

    /// Post to each port of the range in order.
    ///
    /// Stops at the first host that accepts unless `broadcast` is set.
    pub fn notify(&self, workspace: Option<&str>, broadcast: bool) -> Vec<PortReport> {
        let mut reports = Vec::new();
        for port in self.range.ports() {
            let delivery = self.post(port, workspace);
            let accepted = delivery == Delivery::Accepted;
            reports.push(PortReport { port, delivery });
            if accepted && !broadcast {
                break;
            }
        }
        reports
    }
}

/// Form body carrying the optional workspace
pub fn form_body(workspace: Option<&str>) -> String {
    match workspace {
        Some(ws) => format!("workspace={}", encode_component(ws)),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body() {
        assert_eq!(form_body(None), "");
        assert_eq!(
            form_body(Some("/home/dev/my proj")),
            "workspace=%2Fhome%2Fdev%2Fmy+proj"
        );
    }

    #[test]
    fn test_unused_port_is_unreachable() {
        let range = PortRange::new(57963, 1).unwrap();
        let client = HookClient::new("127.0.0.1", range);
        let reports = client.notify(Some("/proj"), false);
        assert_eq!(reports.len(), 1);
        assert!(matches!(reports[0].delivery, Delivery::Unreachable(_)));
    }
}
