// Tests for the workspace store

use std::fs;

use chorus::workspace::{WorkspaceError, WorkspaceStore, MANIFEST_FILE};
use tempfile::TempDir;

fn create_test_store() -> (WorkspaceStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = WorkspaceStore::with_git(temp_dir.path().join("chorus"), "/nonexistent/git-12345");
    (store, temp_dir)
}

#[test]
fn test_missing_root_has_no_repos() {
    let (store, _temp) = create_test_store();
    assert!(!store.exists());
    assert!(store.list_repos().unwrap().is_empty());
}

#[test]
fn test_add_repo_writes_manifest() {
    let (store, _temp) = create_test_store();

    let repo = store
        .add_repo("https://github.com/acme/widgets.git")
        .unwrap();
    assert_eq!(repo, "widgets");

    let manifest = store.manifest("widgets").unwrap();
    assert_eq!(
        manifest.url.as_deref(),
        Some("https://github.com/acme/widgets.git")
    );

    let raw = fs::read_to_string(store.repo_dir("widgets").join(MANIFEST_FILE)).unwrap();
    assert!(raw.contains("url: https://github.com/acme/widgets.git"));
}

#[test]
fn test_add_repo_twice() {
    let (store, _temp) = create_test_store();
    store.add_repo("git@github.com:acme/widgets.git").unwrap();

    let err = store
        .add_repo("https://example.com/other/widgets")
        .unwrap_err();
    assert!(matches!(err, WorkspaceError::RepoExists(ref name) if name == "widgets"));
}

#[test]
fn test_list_repos_sorted_directories_only() {
    let (store, _temp) = create_test_store();
    store.add_repo("https://github.com/acme/zeta.git").unwrap();
    store.add_repo("https://github.com/acme/alpha.git").unwrap();
    fs::write(store.root().join("notes.txt"), "not a repo").unwrap();

    assert_eq!(store.list_repos().unwrap(), vec!["alpha", "zeta"]);
}

#[test]
fn test_list_workspaces() {
    let (store, _temp) = create_test_store();
    store.add_repo("https://github.com/acme/widgets.git").unwrap();

    assert!(store.list_workspaces("widgets").unwrap().is_empty());

    fs::create_dir_all(store.git_root("widgets", "feature-b")).unwrap();
    fs::create_dir_all(store.git_root("widgets", "feature-a")).unwrap();

    // The manifest file is not a workspace
    assert_eq!(
        store.list_workspaces("widgets").unwrap(),
        vec!["feature-a", "feature-b"]
    );

    assert!(matches!(
        store.list_workspaces("missing"),
        Err(WorkspaceError::RepoNotFound(_))
    ));
}

#[test]
fn test_git_root_layout() {
    let (store, _temp) = create_test_store();
    assert_eq!(
        store.git_root("widgets", "main"),
        store.root().join("widgets").join("main").join("widgets")
    );
}

#[test]
fn test_add_workspace_unknown_repo() {
    let (store, _temp) = create_test_store();
    assert!(matches!(
        store.add_workspace("missing", "main"),
        Err(WorkspaceError::RepoNotFound(_))
    ));
}

#[test]
fn test_add_workspace_existing() {
    let (store, _temp) = create_test_store();
    store.add_repo("https://github.com/acme/widgets.git").unwrap();
    fs::create_dir_all(store.workspace_dir("widgets", "main")).unwrap();

    assert!(matches!(
        store.add_workspace("widgets", "main"),
        Err(WorkspaceError::WorkspaceExists { .. })
    ));
}

#[test]
fn test_add_workspace_without_url() {
    let (store, _temp) = create_test_store();
    fs::create_dir_all(store.repo_dir("widgets")).unwrap();
    fs::write(store.repo_dir("widgets").join(MANIFEST_FILE), "{}\n").unwrap();

    assert!(matches!(
        store.add_workspace("widgets", "main"),
        Err(WorkspaceError::MissingUrl(_))
    ));
    assert!(!store.workspace_dir("widgets", "main").exists());
}

#[test]
fn test_add_workspace_clone_failure() {
    let (store, _temp) = create_test_store();
    store.add_repo("https://github.com/acme/widgets.git").unwrap();

    let err = store.add_workspace("widgets", "main").unwrap_err();
    assert!(matches!(err, WorkspaceError::CloneFailed { .. }));
}

#[cfg(unix)]
#[test]
fn test_add_workspace_runs_clone() {
    let temp_dir = TempDir::new().unwrap();
    // `true` accepts any arguments and succeeds
    let store = WorkspaceStore::with_git(temp_dir.path().join("chorus"), "true");
    store.add_repo("https://github.com/acme/widgets.git").unwrap();

    let git_root = store.add_workspace("widgets", "main").unwrap();

    assert_eq!(git_root, store.git_root("widgets", "main"));
    assert!(store.workspace_dir("widgets", "main").is_dir());
    assert_eq!(store.list_workspaces("widgets").unwrap(), vec!["main"]);
}

#[test]
fn test_rejects_path_like_names() {
    let (store, _temp) = create_test_store();
    store.add_repo("https://github.com/acme/widgets.git").unwrap();

    assert!(matches!(
        store.add_workspace("widgets", "../escape"),
        Err(WorkspaceError::InvalidName(_))
    ));
    assert!(matches!(
        store.list_workspaces(".."),
        Err(WorkspaceError::InvalidName(_))
    ));
}

#[cfg(unix)]
#[test]
fn test_lists_symlinked_directories() {
    let (store, temp) = create_test_store();
    store.add_repo("https://github.com/acme/widgets.git").unwrap();

    let elsewhere = temp.path().join("elsewhere");
    fs::create_dir_all(elsewhere.join("shared")).unwrap();
    std::os::unix::fs::symlink(&elsewhere, store.root().join("linked")).unwrap();
    std::os::unix::fs::symlink(elsewhere.join("shared"), store.workspace_dir("widgets", "shared"))
        .unwrap();

    assert_eq!(store.list_repos().unwrap(), vec!["linked", "widgets"]);
    assert_eq!(store.list_workspaces("widgets").unwrap(), vec!["shared"]);
}
