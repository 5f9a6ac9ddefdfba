//! Session errors

/// Errors raised by a multiplexer client
#[derive(Debug, thiserror::Error)]
pub enum MultiplexerError {
    #[error("Failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("`{command}` returned unexpected output: {output:?}")]
    UnexpectedOutput { command: String, output: String },
}

/// Errors raised by the session orchestrator
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to create session '{name}': {source}")]
    Creation {
        name: String,
        #[source]
        source: MultiplexerError,
    },

    #[error("Session '{0}' not found")]
    NotFound(String),

    #[error("Multiplexer error: {0}")]
    Multiplexer(#[from] MultiplexerError),
}
