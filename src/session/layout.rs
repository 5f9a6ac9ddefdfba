//! Fixed pane layout of a Chorus window
//!
//! ```text
//! +-----------+-----------+
//! |           | 1 editor  |
//! |           +-----------+
//! |  0 agent  | 2 shell   |
//! |           +-----------+
//! |           | 3 shell   |
//! +-----------+-----------+
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::multiplexer::SplitDirection;

/// Name of the single window in a Chorus session
pub const WINDOW_NAME: &str = "main";

/// What a pane is for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaneRole {
    Agent,
    Editor,
    Shell,
}

impl PaneRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaneRole::Agent => "agent",
            PaneRole::Editor => "editor",
            PaneRole::Shell => "shell",
        }
    }
}

impl fmt::Display for PaneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split that creates the next pane of the layout
#[derive(Debug, Clone, Copy)]
pub struct SplitStep {
    /// Index of the pane being split
    pub from: usize,
    pub direction: SplitDirection,
}

/// Roles by pane index
pub const ROLES: [PaneRole; 4] = [
    PaneRole::Agent,
    PaneRole::Editor,
    PaneRole::Shell,
    PaneRole::Shell,
];

/// Splits producing panes 1..=3, in order. Pane `n` is created by `SPLITS[n - 1]`.
pub const SPLITS: [SplitStep; 3] = [
    SplitStep {
        from: 0,
        direction: SplitDirection::SideBySide,
    },
    SplitStep {
        from: 1,
        direction: SplitDirection::Stacked,
    },
    SplitStep {
        from: 2,
        direction: SplitDirection::Stacked,
    },
];

/// Pane that receives focus once the layout is built
pub const FOCUS_INDEX: usize = 0;
