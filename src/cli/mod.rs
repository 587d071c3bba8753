//! CLI command implementations

pub mod init;
pub mod notify;
pub mod ports;
pub mod serve;

use std::path::PathBuf;

use terminal_queue::workspace::StaticWorkspace;

/// Workspace from `--workspace`, none with `--no-workspace`, else the current directory.
pub fn resolve_workspace(workspace: Option<PathBuf>, no_workspace: bool) -> StaticWorkspace {
    if no_workspace {
        return StaticWorkspace::none();
    }

    match workspace.or_else(|| std::env::current_dir().ok()) {
        Some(dir) => StaticWorkspace::from_dir(&dir),
        None => StaticWorkspace::none(),
    }
}
