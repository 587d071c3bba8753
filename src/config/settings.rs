//! Settings configuration types

use serde::{Deserialize, Serialize};

use crate::listener::{ListenerError, PortRange, DEFAULT_PORT_BASE, DEFAULT_PORT_SPAN};

/// Notification listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerSettings {
    /// Start the listener on activation
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Loopback address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// First candidate port. Hooks probe the same range.
    #[serde(default = "default_port_base")]
    pub port_base: u16,

    /// Number of candidate ports
    #[serde(default = "default_port_span")]
    pub port_span: u16,
}

impl ListenerSettings {
    pub fn port_range(&self) -> Result<PortRange, ListenerError> {
        PortRange::new(self.port_base, self.port_span)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port_base() -> u16 {
    DEFAULT_PORT_BASE
}

fn default_port_span() -> u16 {
    DEFAULT_PORT_SPAN
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            host: default_host(),
            port_base: default_port_base(),
            port_span: default_port_span(),
        }
    }
}

/// Request queue settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSettings {
    /// Question recorded for requests raised by a hook
    #[serde(default = "default_hook_question")]
    pub hook_question: String,

    /// Questions picked at random by the simulate command
    #[serde(default = "default_simulated_questions")]
    pub simulated_questions: Vec<String>,
}

fn default_hook_question() -> String {
    "User input required".to_string()
}

fn default_simulated_questions() -> Vec<String> {
    [
        "What is your favorite color?",
        "Enter your API key",
        "Enter a project name",
        "Continue? (y/n)",
        "Select a database",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect()
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            hook_question: default_hook_question(),
            simulated_questions: default_simulated_questions(),
        }
    }
}
