//! Notify command implementation (the hook side)

use anyhow::Result;
use tracing::warn;

use terminal_queue::config::Config;
use terminal_queue::hook::{Delivery, HookClient};
use terminal_queue::workspace::{StaticWorkspace, WorkspaceResolver};

/// Post a hook notification to the hosts on the configured port range.
///
/// Never fails because no host accepted: hooks are best-effort.
pub fn notify_command(config: &Config, workspace: &StaticWorkspace, broadcast: bool) -> Result<()> {
    let range = config.listener.port_range()?;
    let client = HookClient::new(config.listener.host.clone(), range);
    let workspace = workspace.current_workspace_path();

    let reports = client.notify(workspace.as_deref(), broadcast);

    for report in &reports {
        match &report.delivery {
            Delivery::Accepted => println!("{}: accepted", report.port),
            Delivery::Skipped => println!("{}: skipped (other workspace)", report.port),
            Delivery::NotFound => println!("{}: not a terminal-queue listener", report.port),
            Delivery::Unexpected(body) => println!("{}: unexpected response: {}", report.port, body),
            Delivery::Unreachable(_) => {}
        }
    }

    if !reports.iter().any(|r| r.delivery == Delivery::Accepted) {
        warn!(
            "No host on ports {} accepted the notification (workspace: {})",
            range,
            workspace.as_deref().unwrap_or("none")
        );
    }

    Ok(())
}
