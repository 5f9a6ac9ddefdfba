//! Workspace store
//!
//! Layout of the backing directory:
//!
//! ```text
//! <root>/<repo>/chorus.yaml              repo manifest (git url)
//! <root>/<repo>/<workspace>/<repo>/      git checkout
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Per-repo manifest file name
pub const MANIFEST_FILE: &str = "chorus.yaml";

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("Repo '{0}' already exists")]
    RepoExists(String),

    #[error("Repo '{0}' not found")]
    RepoNotFound(String),

    #[error("Workspace '{workspace}' already exists for repo '{repo}'")]
    WorkspaceExists { repo: String, workspace: String },

    #[error("Git URL not found in {0}")]
    MissingUrl(PathBuf),

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("git clone of {url} failed: {reason}")]
    CloneFailed { url: String, reason: String },

    #[error("Invalid manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Contents of `chorus.yaml` inside a repo directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoManifest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Repos and workspaces under the backing directory
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    root: PathBuf,
    git_path: String,
}

impl WorkspaceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let git_path = which::which("git")
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| "git".to_string());

        Self::with_git(root, git_path)
    }

    pub fn with_git(root: impl Into<PathBuf>, git_path: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            git_path: git_path.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    pub fn repo_dir(&self, repo: &str) -> PathBuf {
        self.root.join(repo)
    }

    pub fn workspace_dir(&self, repo: &str, workspace: &str) -> PathBuf {
        self.repo_dir(repo).join(workspace)
    }

    /// Root of the git checkout for a workspace
    pub fn git_root(&self, repo: &str, workspace: &str) -> PathBuf {
        self.workspace_dir(repo, workspace).join(repo)
    }

    /// Repo directories under the root, sorted. A missing root has none.
    pub fn list_repos(&self) -> Result<Vec<String>, WorkspaceError> {
        if !self.exists() {
            return Ok(Vec::new());
        }
        list_dirs(&self.root)
    }

    /// Workspaces of `repo`, sorted
    pub fn list_workspaces(&self, repo: &str) -> Result<Vec<String>, WorkspaceError> {
        validate_name(repo)?;
        let repo_dir = self.repo_dir(repo);
        if !repo_dir.is_dir() {
            return Err(WorkspaceError::RepoNotFound(repo.to_string()));
        }
        list_dirs(&repo_dir)
    }

    /// Register a repo by git URL. Returns the derived repo name.
    pub fn add_repo(&self, git_url: &str) -> Result<String, WorkspaceError> {
        let repo = repo_name_from_url(git_url)?;
        let repo_dir = self.repo_dir(&repo);

        if repo_dir.exists() {
            return Err(WorkspaceError::RepoExists(repo));
        }

        fs::create_dir_all(&repo_dir)?;

        let manifest = RepoManifest {
            url: Some(git_url.to_string()),
        };
        let path = repo_dir.join(MANIFEST_FILE);
        let content = serde_yaml::to_string(&manifest).map_err(|source| WorkspaceError::Manifest {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, content)?;

        info!("Added repo '{}' ({})", repo, git_url);
        Ok(repo)
    }

    /// Read a repo's manifest
    pub fn manifest(&self, repo: &str) -> Result<RepoManifest, WorkspaceError> {
        validate_name(repo)?;
        let repo_dir = self.repo_dir(repo);
        if !repo_dir.is_dir() {
            return Err(WorkspaceError::RepoNotFound(repo.to_string()));
        }

        let path = repo_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(RepoManifest::default());
        }

        let raw = fs::read_to_string(&path)?;
        let manifest: Option<RepoManifest> =
            serde_yaml::from_str(&raw).map_err(|source| WorkspaceError::Manifest {
                path: path.clone(),
                source,
            })?;
        Ok(manifest.unwrap_or_default())
    }

    /// Create a workspace and clone the repo into it. Returns the git root.
    pub fn add_workspace(&self, repo: &str, workspace: &str) -> Result<PathBuf, WorkspaceError> {
        validate_name(workspace)?;
        let manifest = self.manifest(repo)?;

        let workspace_dir = self.workspace_dir(repo, workspace);
        if workspace_dir.exists() {
            return Err(WorkspaceError::WorkspaceExists {
                repo: repo.to_string(),
                workspace: workspace.to_string(),
            });
        }

        let url = manifest
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| WorkspaceError::MissingUrl(self.repo_dir(repo).join(MANIFEST_FILE)))?;

        fs::create_dir_all(&workspace_dir)?;

        let git_root = self.git_root(repo, workspace);
        self.clone_repo(&url, &git_root)?;

        info!("Created workspace '{}' for repo '{}'", workspace, repo);
        Ok(git_root)
    }

    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), WorkspaceError> {
        debug!("Cloning {} into {:?}", url, dest);

        // Output is inherited so git can show progress
        let status = Command::new(&self.git_path)
            .arg("clone")
            .arg(url)
            .arg(dest)
            .status()
            .map_err(|e| WorkspaceError::CloneFailed {
                url: url.to_string(),
                reason: format!("failed to run {}: {}", self.git_path, e),
            })?;

        if !status.success() {
            return Err(WorkspaceError::CloneFailed {
                url: url.to_string(),
                reason: format!("git exited with {}", status),
            });
        }

        Ok(())
    }
}

/// Derive a repo name from a git URL: last path segment without `.git`
pub fn repo_name_from_url(git_url: &str) -> Result<String, WorkspaceError> {
    let trimmed = git_url.trim().trim_end_matches('/');
    let segment = trimmed
        .rsplit(|c: char| c == '/' || c == ':')
        .next()
        .unwrap_or_default();
    let name = segment.strip_suffix(".git").unwrap_or(segment);

    validate_name(name).map_err(|_| WorkspaceError::InvalidName(git_url.to_string()))?;
    Ok(name.to_string())
}

fn validate_name(name: &str) -> Result<(), WorkspaceError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(WorkspaceError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn list_dirs(dir: &Path) -> Result<Vec<String>, WorkspaceError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Follows symlinks, so linked checkouts are listed too
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}
