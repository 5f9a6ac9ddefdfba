//! Session orchestrator
//!
//! Builds the Chorus tmux session for a workspace and manages its lifecycle.
//! Creation always replaces a session of the same name: whatever was running
//! in the previous agent, editor and shell panes is discarded.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::editor::editor_from_env;
use super::error::{MultiplexerError, SessionError};
use super::layout::{PaneRole, FOCUS_INDEX, ROLES, SPLITS, WINDOW_NAME};
use super::multiplexer::{Multiplexer, PaneId};

/// Session name used when none is configured
pub const DEFAULT_SESSION_NAME: &str = "chorus";

/// A session built by the orchestrator
#[derive(Debug, Clone)]
pub struct Session {
    pub name: String,
    pub working_directory: PathBuf,
    pub window: Window,
    /// Index of the focused pane
    pub active_pane: usize,
}

#[derive(Debug, Clone)]
pub struct Window {
    pub name: String,
    pub panes: Vec<Pane>,
}

#[derive(Debug, Clone)]
pub struct Pane {
    pub index: usize,
    pub id: PaneId,
    pub role: PaneRole,
    pub working_directory: PathBuf,
    /// Command typed into the pane at startup
    pub command: Option<String>,
}

impl Session {
    /// Panes holding `role`, in index order
    pub fn panes_with_role(&self, role: PaneRole) -> impl Iterator<Item = &Pane> {
        self.window.panes.iter().filter(move |p| p.role == role)
    }

    pub fn pane(&self, index: usize) -> Option<&Pane> {
        self.window.panes.get(index)
    }
}

/// tmux stores `.` and `:` in session names as `_`; lookups must use the stored form
pub fn normalize_session_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_SESSION_NAME.to_string();
    }
    name.replace(['.', ':'], "_")
}

pub struct SessionOrchestrator<M: Multiplexer> {
    multiplexer: M,
    session_name: String,
    editor: String,
}

impl<M: Multiplexer> SessionOrchestrator<M> {
    /// Orchestrator for the default session name, editor taken from `$EDITOR`
    pub fn new(multiplexer: M) -> Self {
        Self {
            multiplexer,
            session_name: DEFAULT_SESSION_NAME.to_string(),
            editor: editor_from_env(),
        }
    }

    /// Use `name` for the session, spelled the way tmux will store it
    pub fn with_session_name(mut self, name: impl AsRef<str>) -> Self {
        self.session_name = normalize_session_name(name.as_ref());
        self
    }

    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = editor.into();
        self
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    pub fn multiplexer(&self) -> &M {
        &self.multiplexer
    }

    /// Create the session for `working_directory`, replacing any existing one.
    ///
    /// `working_directory` must exist; it is not checked here. On failure a
    /// partially built session may remain, the next call replaces it.
    pub fn create_session(
        &self,
        working_directory: &Path,
        agent_command: &str,
    ) -> Result<Session, SessionError> {
        self.build_session(working_directory, agent_command)
            .map_err(|source| SessionError::Creation {
                name: self.session_name.clone(),
                source,
            })
    }

    /// Hand the terminal over to the session until the user detaches
    pub fn attach_to_session(&self) -> Result<(), SessionError> {
        if !self.session_exists()? {
            return Err(SessionError::NotFound(self.session_name.clone()));
        }

        info!("Attaching to session '{}'", self.session_name);
        self.multiplexer.attach(&self.session_name)?;
        Ok(())
    }

    /// Check if the session is live
    pub fn session_exists(&self) -> Result<bool, SessionError> {
        Ok(self.find_session()?)
    }

    fn find_session(&self) -> Result<bool, MultiplexerError> {
        let sessions = self.multiplexer.list_sessions()?;
        Ok(sessions.iter().any(|s| *s == self.session_name))
    }

    fn build_session(
        &self,
        working_directory: &Path,
        agent_command: &str,
    ) -> Result<Session, MultiplexerError> {
        let name = self.session_name.as_str();

        if self.find_session()? {
            info!("Replacing existing session '{}'", name);
            self.multiplexer.kill_session(name)?;
        }

        let first = self
            .multiplexer
            .new_session(name, working_directory, WINDOW_NAME)?;

        let mut ids = vec![first];
        for step in SPLITS {
            let id = self
                .multiplexer
                .split_pane(&ids[step.from], step.direction, working_directory)?;
            debug!("Split pane {} ({:?}) into {}", step.from, step.direction, id);
            ids.push(id);
        }

        let panes: Vec<Pane> = ids
            .into_iter()
            .zip(ROLES)
            .enumerate()
            .map(|(index, (id, role))| Pane {
                index,
                id,
                role,
                working_directory: working_directory.to_path_buf(),
                command: self.startup_command(role, agent_command),
            })
            .collect();

        for pane in &panes {
            if let Some(command) = &pane.command {
                debug!("Pane {} ({}): {}", pane.index, pane.role, command);
                self.multiplexer.send_command(&pane.id, command)?;
            }
        }

        self.multiplexer.select_pane(&panes[FOCUS_INDEX].id)?;

        info!(
            "Created session '{}' in {}",
            name,
            working_directory.display()
        );

        Ok(Session {
            name: name.to_string(),
            working_directory: working_directory.to_path_buf(),
            window: Window {
                name: WINDOW_NAME.to_string(),
                panes,
            },
            active_pane: FOCUS_INDEX,
        })
    }

    fn startup_command(&self, role: PaneRole, agent_command: &str) -> Option<String> {
        match role {
            PaneRole::Agent => Some(agent_command.to_string()),
            PaneRole::Editor => Some(self.editor.clone()),
            PaneRole::Shell => None,
        }
    }
}
