use super::*;
use std::path::PathBuf;

#[test]
fn test_normalize_path() {
    assert_eq!(normalize_path("/Proj/"), "/proj");
    assert_eq!(normalize_path(r"C:\Users\Dev\Proj"), "c:/users/dev/proj");
    assert_eq!(normalize_path("/proj//"), "/proj/");
    assert_eq!(normalize_path("/proj"), "/proj");
}

#[test]
fn test_workspace_match_rules() {
    let current = Some("/Proj");

    assert!(is_workspace_match(None, current));
    assert!(is_workspace_match(Some(""), current));
    assert!(is_workspace_match(Some("/Proj/"), current));
    assert!(is_workspace_match(Some("/PROJ"), current));
    assert!(!is_workspace_match(Some("/Other"), current));
}

#[test]
fn test_workspace_match_windows_style_paths() {
    assert!(is_workspace_match(
        Some(r"C:\Work\Repo\"),
        Some("c:/work/repo")
    ));
}

#[test]
fn test_supplied_workspace_never_matches_missing_current() {
    assert!(!is_workspace_match(Some("/Proj"), None));
    assert!(is_workspace_match(None, None));
}

#[test]
fn test_static_workspace_resolver() {
    let resolver = StaticWorkspace::new(PathBuf::from("/tmp/project"));
    assert_eq!(
        resolver.current_workspace_path().as_deref(),
        Some("/tmp/project")
    );
    assert!(StaticWorkspace::none().current_workspace_path().is_none());
}

#[test]
fn test_static_workspace_from_dir_canonicalizes() {
    let dir = tempfile::TempDir::new().unwrap();
    let nested = dir.path().join(".");
    let resolver = StaticWorkspace::from_dir(&nested);
    let expected = dir.path().canonicalize().unwrap();
    assert_eq!(resolver.path(), Some(expected.as_path()));
}
