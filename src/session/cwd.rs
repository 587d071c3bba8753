//! Best-effort working directory lookup for terminal processes.
//!
//! Nothing here is authoritative: every lookup may fail, and failures are
//! reported as `None` rather than errors.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Current working directory of process `pid`, if it can be determined.
///
/// Linux reads `/proc/<pid>/cwd` and falls back to `pwdx`; macOS asks `lsof`.
/// Other platforms always return `None`.
pub fn detect_cwd(pid: u32) -> Option<PathBuf> {
    let cwd = platform_cwd(pid);
    if cwd.is_none() {
        debug!("[tq:cwd] Could not determine cwd of pid {}", pid);
    }
    cwd
}

#[cfg(target_os = "linux")]
fn platform_cwd(pid: u32) -> Option<PathBuf> {
    if let Ok(path) = std::fs::read_link(format!("/proc/{}/cwd", pid)) {
        return Some(path);
    }
    command_stdout("pwdx", &[pid.to_string()]).and_then(|out| parse_pwdx(&out))
}

#[cfg(target_os = "macos")]
fn platform_cwd(pid: u32) -> Option<PathBuf> {
    let args = [
        "-a".to_string(),
        "-d".to_string(),
        "cwd".to_string(),
        "-p".to_string(),
        pid.to_string(),
        "-Fn".to_string(),
    ];
    command_stdout("lsof", &args).and_then(|out| parse_lsof(&out))
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn platform_cwd(_pid: u32) -> Option<PathBuf> {
    None
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
fn command_stdout(program: &str, args: &[String]) -> Option<String> {
    let output = std::process::Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `pwdx` output (`1234: /some/dir`).
#[cfg(any(target_os = "linux", test))]
pub(crate) fn parse_pwdx(output: &str) -> Option<PathBuf> {
    let line = output.lines().next()?;
    let (_, path) = line.split_once(": ")?;
    let path = path.trim();
    (!path.is_empty()).then(|| PathBuf::from(path))
}

/// Parse `lsof -Fn` output, where the path is on the line prefixed with `n`.
#[cfg(any(target_os = "macos", test))]
pub(crate) fn parse_lsof(output: &str) -> Option<PathBuf> {
    output
        .lines()
        .find_map(|line| line.strip_prefix('n'))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Whether `cwd` lies inside `workspace`
pub fn is_in_workspace(cwd: &Path, workspace: &Path) -> bool {
    cwd.starts_with(workspace)
}
