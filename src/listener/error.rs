//! Listener startup errors

/// Error type for starting the notification listener
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("All ports ({start}-{end}) are in use")]
    PortsExhausted { start: u16, end: u16 },

    #[error("Invalid port range: base {base}, span {span}")]
    InvalidRange { base: u16, span: u16 },

    #[error("Failed to spawn listener thread: {0}")]
    Spawn(#[from] std::io::Error),
}
