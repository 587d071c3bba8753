//! Sequential port probing over a fixed range

use tiny_http::Server;
use tracing::debug;

use super::ListenerError;

/// Well-known first port of the candidate range
pub const DEFAULT_PORT_BASE: u16 = 57843;

/// Number of candidate ports
pub const DEFAULT_PORT_SPAN: u16 = 10;

/// Inclusive range of candidate ports, `base..=base + span - 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    base: u16,
    span: u16,
}

impl PortRange {
    pub fn new(base: u16, span: u16) -> Result<Self, ListenerError> {
        if span == 0 || base == 0 || base.checked_add(span - 1).is_none() {
            return Err(ListenerError::InvalidRange { base, span });
        }
        Ok(Self { base, span })
    }

    pub fn start(&self) -> u16 {
        self.base
    }

    pub fn end(&self) -> u16 {
        self.base + (self.span - 1)
    }

    pub fn contains(&self, port: u16) -> bool {
        (self.start()..=self.end()).contains(&port)
    }

    pub fn ports(&self) -> impl Iterator<Item = u16> {
        self.start()..=self.end()
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self {
            base: DEFAULT_PORT_BASE,
            span: DEFAULT_PORT_SPAN,
        }
    }
}

impl std::fmt::Display for PortRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start(), self.end())
    }
}

/// Bind the first free port of `range` on `host`.
///
/// Ports are tried one at a time in ascending order and the winning socket is
/// the one that serves requests. Individual bind failures are only logged.
pub fn bind_first_available(host: &str, range: PortRange) -> Result<(Server, u16), ListenerError> {
    for port in range.ports() {
        let bind_addr = format!("{}:{}", host, port);
        match Server::http(&bind_addr) {
            Ok(server) => return Ok((server, port)),
            Err(e) => debug!("[tq:http] {} unavailable: {}", bind_addr, e),
        }
    }

    Err(ListenerError::PortsExhausted {
        start: range.start(),
        end: range.end(),
    })
}

/// Ports of `range` that can currently be bound on `host`.
///
/// Each probe socket is closed again before the next port is tried.
pub fn free_ports(host: &str, range: PortRange) -> Vec<u16> {
    range
        .ports()
        .filter(|port| std::net::TcpListener::bind((host, *port)).is_ok())
        .collect()
}
