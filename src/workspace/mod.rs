//! Workspace identity used to route hook notifications
//!
//! The workspace module provides:
//! - WorkspaceResolver: how the host reports the workspace it has open
//! - StaticWorkspace: a resolver fixed at startup (CLI flag or current dir)
//! - Path normalization and the matching rule applied to incoming hooks

mod matching;

#[cfg(test)]
mod tests;

pub use matching::{is_workspace_match, normalize_path};

use std::path::{Path, PathBuf};

/// Reports the filesystem path of the workspace the host has open
pub trait WorkspaceResolver {
    /// `None` when the host was started without a workspace
    fn current_workspace_path(&self) -> Option<String>;
}

/// Resolver that always answers with the same path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticWorkspace {
    path: Option<PathBuf>,
}

impl StaticWorkspace {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Resolver for a host without an open workspace
    pub fn none() -> Self {
        Self { path: None }
    }

    /// Resolve a user-supplied path, canonicalizing it when possible.
    pub fn from_dir(dir: &Path) -> Self {
        let path = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        Self::new(path)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl WorkspaceResolver for StaticWorkspace {
    fn current_workspace_path(&self) -> Option<String> {
        self.path.as_ref().map(|p| p.display().to_string())
    }
}
