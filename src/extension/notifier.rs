//! User-facing messages

use tracing::{error, info, warn};

/// How the host shows messages to the user
pub trait Notifier {
    fn info(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);

    /// Ask the user to confirm a destructive action
    fn confirm(&mut self, message: &str, accept_label: &str) -> bool;
}

/// Notifier that only logs.
///
/// Confirmations are answered with the value given at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier {
    assume_yes: bool,
}

impl LogNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for LogNotifier {
    fn info(&mut self, message: &str) {
        info!("{}", message);
    }

    fn warn(&mut self, message: &str) {
        warn!("{}", message);
    }

    fn error(&mut self, message: &str) {
        error!("{}", message);
    }

    fn confirm(&mut self, message: &str, accept_label: &str) -> bool {
        info!("{} [{}: {}]", message, accept_label, self.assume_yes);
        self.assume_yes
    }
}
