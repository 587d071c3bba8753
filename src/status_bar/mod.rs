//! Status indicator for the request queue
//!
//! Mirrors the queue length into the text a host shows in its status bar.
//! Hidden while nothing is waiting; clicking it runs the "next" command.

/// Host command bound to a click on the indicator
pub const CLICK_COMMAND: &str = "next";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusState {
    #[default]
    Hidden,
    Waiting(usize),
    Processing,
}

/// Status bar item driven by queue length changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusIndicator {
    state: StatusState,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reflect a new queue length
    pub fn update_queue_count(&mut self, count: usize) {
        self.state = match count {
            0 => StatusState::Hidden,
            n => {
                tracing::debug!("[tq:status] {} waiting", n);
                StatusState::Waiting(n)
            }
        };
    }

    pub fn show_processing(&mut self) {
        self.state = StatusState::Processing;
    }

    pub fn hide(&mut self) {
        self.state = StatusState::Hidden;
    }

    pub fn state(&self) -> StatusState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != StatusState::Hidden
    }

    /// Label to render, `None` while hidden
    pub fn text(&self) -> Option<String> {
        match self.state {
            StatusState::Hidden => None,
            StatusState::Waiting(n) => Some(format!("Waiting for input: {}", n)),
            StatusState::Processing => Some("Processing...".to_string()),
        }
    }

    pub fn tooltip(&self) -> Option<String> {
        match self.state {
            StatusState::Hidden => None,
            StatusState::Waiting(n) => Some(format!(
                "A terminal is waiting for your input\nRun `{}` to jump to it\nPending: {}",
                CLICK_COMMAND, n
            )),
            StatusState::Processing => Some("Handling input...".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_when_empty() {
        let mut status = StatusIndicator::new();
        status.update_queue_count(3);
        status.update_queue_count(0);
        assert!(!status.is_visible());
        assert_eq!(status.text(), None);
    }

    #[test]
    fn test_waiting_text_tracks_count() {
        let mut status = StatusIndicator::new();
        status.update_queue_count(2);
        assert_eq!(status.state(), StatusState::Waiting(2));
        assert_eq!(status.text().as_deref(), Some("Waiting for input: 2"));
        assert!(status.tooltip().unwrap().ends_with("Pending: 2"));
    }

    #[test]
    fn test_processing_state() {
        let mut status = StatusIndicator::new();
        status.show_processing();
        assert!(status.is_visible());
        assert_eq!(status.text().as_deref(), Some("Processing..."));
        status.hide();
        assert_eq!(status.state(), StatusState::Hidden);
    }
}
