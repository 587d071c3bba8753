//! Configuration loading and management

mod io;
mod settings;


pub use io::DEFAULT_CONFIG;
pub use settings::{ListenerSettings, QueueSettings};

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Notification listener settings
    #[serde(default)]
    pub listener: ListenerSettings,

    /// Request queue settings
    #[serde(default)]
    pub queue: QueueSettings,
}
