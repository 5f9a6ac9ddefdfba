//! Session management module

pub mod editor;
pub mod error;
pub mod layout;
pub mod multiplexer;
pub mod orchestrator;
pub mod tmux;

pub use editor::{editor_from_env, resolve_editor, DEFAULT_EDITOR};
pub use error::{MultiplexerError, SessionError};
pub use layout::PaneRole;
pub use multiplexer::{Multiplexer, PaneId, SplitDirection};
pub use orchestrator::{
    normalize_session_name, Pane, Session, SessionOrchestrator, Window, DEFAULT_SESSION_NAME,
};
pub use tmux::TmuxClient;
