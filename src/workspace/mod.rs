//! Repo and workspace checkouts

pub mod store;

pub use store::{repo_name_from_url, RepoManifest, WorkspaceError, WorkspaceStore, MANIFEST_FILE};
