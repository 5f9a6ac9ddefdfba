//! tmux CLI client

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use tracing::{debug, info};

use super::error::MultiplexerError;
use super::multiplexer::{Multiplexer, PaneId, SplitDirection};

/// Format string making tmux print the id of a pane it just created
const PANE_ID_FORMAT: &str = "#{pane_id}";

/// Multiplexer backed by the `tmux` binary
pub struct TmuxClient {
    /// Path to tmux binary
    tmux_path: String,
    /// Server socket name (`tmux -L`), default server when unset
    socket: Option<String>,
}

impl TmuxClient {
    pub fn new(tmux_path: impl Into<String>) -> Self {
        Self {
            tmux_path: tmux_path.into(),
            socket: None,
        }
    }

    /// Talk to the server on a named socket instead of the default one
    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.socket = Some(socket.into());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.tmux_path);
        if let Some(socket) = &self.socket {
            cmd.args(["-L", socket.as_str()]);
        }
        cmd
    }

    /// Get the CLI path
    pub fn tmux_path(&self) -> &str {
        &self.tmux_path
    }

    /// Check if tmux is available
    pub fn is_available(&self) -> bool {
        match self.command().arg("-V").output() {
            Ok(output) => output.status.success(),
            Err(e) => {
                debug!("tmux availability check failed: {}", e);
                false
            }
        }
    }

    /// Run tmux with `args` and return its stdout
    fn run<I, S>(&self, args: I) -> Result<String, MultiplexerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.command();
        cmd.args(args);
        let command = describe(&cmd);

        debug!("Running {}", command);

        let output = cmd.output().map_err(|source| MultiplexerError::Io {
            program: self.tmux_path.clone(),
            source,
        })?;

        check_output(command, output)
    }

    /// Run a tmux command that prints the id of a newly created pane
    fn run_for_pane(&self, args: &[&OsStr]) -> Result<PaneId, MultiplexerError> {
        let stdout = self.run(args.iter().copied())?;
        let command = args
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        parse_pane_id(&command, &stdout)
    }
}

impl Default for TmuxClient {
    fn default() -> Self {
        let tmux_path = which::which("tmux")
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| "tmux".to_string());

        Self::new(tmux_path)
    }
}

impl Multiplexer for TmuxClient {
    fn list_sessions(&self) -> Result<Vec<String>, MultiplexerError> {
        match self.run(["list-sessions", "-F", "#{session_name}"]) {
            Ok(stdout) => Ok(stdout
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect()),
            Err(MultiplexerError::CommandFailed { ref stderr, .. }) if is_no_server(stderr) => {
                debug!("No tmux server running");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn kill_session(&self, name: &str) -> Result<(), MultiplexerError> {
        // `=` forces an exact match instead of tmux's prefix matching
        let target = format!("={}", name);
        self.run(["kill-session", "-t", target.as_str()])?;
        info!("Killed tmux session: {}", name);
        Ok(())
    }

    fn new_session(
        &self,
        name: &str,
        start_directory: &Path,
        window_name: &str,
    ) -> Result<PaneId, MultiplexerError> {
        let args: [&OsStr; 11] = [
            "new-session".as_ref(),
            "-d".as_ref(),
            "-s".as_ref(),
            name.as_ref(),
            "-n".as_ref(),
            window_name.as_ref(),
            "-c".as_ref(),
            start_directory.as_os_str(),
            "-P".as_ref(),
            "-F".as_ref(),
            PANE_ID_FORMAT.as_ref(),
        ];
        let pane = self.run_for_pane(&args)?;
        info!("Created tmux session: {}", name);
        Ok(pane)
    }

    fn split_pane(
        &self,
        target: &PaneId,
        direction: SplitDirection,
        start_directory: &Path,
    ) -> Result<PaneId, MultiplexerError> {
        let flag = match direction {
            SplitDirection::SideBySide => "-h",
            SplitDirection::Stacked => "-v",
        };
        let args: [&OsStr; 9] = [
            "split-window".as_ref(),
            flag.as_ref(),
            "-t".as_ref(),
            target.as_str().as_ref(),
            "-c".as_ref(),
            start_directory.as_os_str(),
            "-P".as_ref(),
            "-F".as_ref(),
            PANE_ID_FORMAT.as_ref(),
        ];
        self.run_for_pane(&args)
    }

    fn select_pane(&self, target: &PaneId) -> Result<(), MultiplexerError> {
        self.run(["select-pane", "-t", target.as_str()])?;
        Ok(())
    }

    fn send_command(&self, target: &PaneId, text: &str) -> Result<(), MultiplexerError> {
        // -l sends the text literally, so key names inside it are not interpreted.
        // -- keeps text starting with `-` from being read as a flag.
        if !text.is_empty() {
            self.run(["send-keys", "-t", target.as_str(), "-l", "--", text])?;
        }
        self.run(["send-keys", "-t", target.as_str(), "Enter"])?;
        Ok(())
    }

    fn attach(&self, name: &str) -> Result<(), MultiplexerError> {
        let target = format!("={}", name);

        // Nesting tmux inside tmux is refused, switch the current client instead
        if std::env::var_os("TMUX").is_some() {
            self.run(["switch-client", "-t", target.as_str()])?;
            return Ok(());
        }

        let mut cmd = self.command();
        cmd.args(["attach-session", "-t", target.as_str()]);
        let command = describe(&cmd);

        debug!("Attaching: {}", command);

        let status = cmd.status().map_err(|source| MultiplexerError::Io {
            program: self.tmux_path.clone(),
            source,
        })?;

        if !status.success() {
            return Err(MultiplexerError::CommandFailed {
                command,
                stderr: format!("exited with {}", status),
            });
        }

        Ok(())
    }
}

fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().to_string()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().to_string()));
    parts.join(" ")
}

fn check_output(command: String, output: Output) -> Result<String, MultiplexerError> {
    if !output.status.success() {
        return Err(MultiplexerError::CommandFailed {
            command,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// tmux reports a missing or exiting server on stderr when there is nothing to list
fn is_no_server(stderr: &str) -> bool {
    ["no server running", "error connecting to", "server exited unexpectedly"]
        .iter()
        .any(|m| stderr.contains(m))
}

fn parse_pane_id(command: &str, stdout: &str) -> Result<PaneId, MultiplexerError> {
    let id = stdout.trim();
    if id.len() > 1 && id.starts_with('%') && id[1..].chars().all(|c| c.is_ascii_digit()) {
        Ok(PaneId::new(id))
    } else {
        Err(MultiplexerError::UnexpectedOutput {
            command: command.to_string(),
            output: stdout.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pane_id() {
        assert_eq!(parse_pane_id("tmux", "%12\n").unwrap(), PaneId::new("%12"));
        assert!(parse_pane_id("tmux", "").is_err());
        assert!(parse_pane_id("tmux", "%").is_err());
        assert!(parse_pane_id("tmux", "main.0").is_err());
    }

    #[test]
    fn test_is_no_server() {
        assert!(is_no_server("no server running on /tmp/tmux-1000/default"));
        assert!(is_no_server(
            "error connecting to /tmp/tmux-1000/default (No such file or directory)"
        ));
        assert!(is_no_server("server exited unexpectedly"));
        assert!(!is_no_server("can't find session: chorus"));
    }

    #[test]
    fn test_missing_binary_is_io_error() {
        let client = TmuxClient::new("/nonexistent/tmux-12345");
        assert!(!client.is_available());
        assert!(matches!(
            client.list_sessions(),
            Err(MultiplexerError::Io { .. })
        ));
    }
}
