//! Multiplexer trait

use std::fmt;
use std::path::Path;

use super::error::MultiplexerError;

/// Multiplexer-assigned pane identifier (tmux `%N`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaneId(pub String);

impl PaneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a pane is divided when split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    /// New pane to the right of the target (tmux `-h`)
    SideBySide,
    /// New pane below the target (tmux `-v`)
    Stacked,
}

/// Control interface of a terminal multiplexer server.
///
/// Every call blocks until the server has applied the operation.
pub trait Multiplexer {
    /// Names of all live sessions. An absent server has no sessions.
    fn list_sessions(&self) -> Result<Vec<String>, MultiplexerError>;

    /// Kill a session by name
    fn kill_session(&self, name: &str) -> Result<(), MultiplexerError>;

    /// Create a detached session with a single window and return its pane
    fn new_session(
        &self,
        name: &str,
        start_directory: &Path,
        window_name: &str,
    ) -> Result<PaneId, MultiplexerError>;

    /// Split `target` and return the newly created pane
    fn split_pane(
        &self,
        target: &PaneId,
        direction: SplitDirection,
        start_directory: &Path,
    ) -> Result<PaneId, MultiplexerError>;

    /// Make `target` the active pane of its window
    fn select_pane(&self, target: &PaneId) -> Result<(), MultiplexerError>;

    /// Type `text` literally into `target` and press Enter
    fn send_command(&self, target: &PaneId, text: &str) -> Result<(), MultiplexerError>;

    /// Hand the controlling terminal to the session until the user detaches
    fn attach(&self, name: &str) -> Result<(), MultiplexerError>;
}
