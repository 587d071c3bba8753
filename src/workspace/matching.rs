//! Workspace path normalization and hook matching

/// Normalize a workspace path for comparison.
///
/// Lowercases, converts backslashes to forward slashes and strips a single
/// trailing slash.
pub fn normalize_path(path: &str) -> String {
    let normalized = path.to_lowercase().replace('\\', "/");
    match normalized.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}

/// Decide whether a hook notification is meant for this process.
///
/// A missing or empty `requested` workspace always matches so that hooks
/// which do not send one keep working. A supplied workspace never matches a
/// process without a workspace.
pub fn is_workspace_match(requested: Option<&str>, current: Option<&str>) -> bool {
    let Some(requested) = requested.filter(|r| !r.is_empty()) else {
        return true;
    };

    let Some(current) = current else {
        return false;
    };

    normalize_path(requested) == normalize_path(current)
}
