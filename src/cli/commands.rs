//! CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;

use crate::config::Config;
use crate::session::{SessionError, SessionOrchestrator, TmuxClient};
use crate::workspace::{WorkspaceError, WorkspaceStore};

use super::prompt;

#[derive(Parser)]
#[command(name = "chorus")]
#[command(about = "Manage multiple copies of multiple repos being edited by coding agents in parallel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: ~/.config/chorus.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all repos that have at least one workspace checked out
    ListRepos,

    /// List all workspaces for a repo
    ListWorkspaces {
        /// Repo name
        repo: String,
    },

    /// Add a new repo
    AddRepo {
        /// Git URL to clone workspaces from
        git_url: String,
    },

    /// Create a new workspace for a repo and clone the repo into it
    AddWorkspace {
        /// Repo name
        repo: String,

        /// Workspace name
        workspace: String,
    },

    /// Connect to a workspace in a new tmux session
    Connect {
        /// Repo name (prompted if omitted)
        #[arg(long)]
        repo: Option<String>,

        /// Workspace name (prompted if omitted)
        #[arg(long)]
        workspace: Option<String>,

        /// Agent command (prompted if omitted)
        #[arg(long)]
        agent: Option<String>,

        /// Create the session without attaching to it
        #[arg(long)]
        no_attach: bool,
    },

    /// Attach to the existing Chorus session
    Attach,

    /// Show the loaded configuration
    Config,

    /// Add a new agent to the configuration
    AddAgent {
        /// Agent command, e.g. `claude`
        agent: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let config = Config::load(config_path)?;
    let store = WorkspaceStore::new(config.chorus_directory()?);

    match cli.command {
        Commands::ListRepos => {
            if !store.exists() {
                println!(
                    "Chorus storage directory ({}) does not exist.",
                    store.root().display()
                );
                return Ok(());
            }

            let repos = store.list_repos()?;
            if repos.is_empty() {
                println!("No repos found in {}.", store.root().display());
            } else {
                for repo in repos {
                    println!("{}", repo);
                }
            }
            Ok(())
        }

        Commands::ListWorkspaces { repo } => {
            let workspaces = match store.list_workspaces(&repo) {
                Ok(workspaces) => workspaces,
                Err(WorkspaceError::RepoNotFound(_)) => {
                    println!("Repo '{}' not found in {}.", repo, store.root().display());
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            if workspaces.is_empty() {
                println!("No workspaces found for repo '{}'.", repo);
            } else {
                for workspace in workspaces {
                    println!("{}", workspace);
                }
            }
            Ok(())
        }

        Commands::AddRepo { git_url } => {
            match store.add_repo(&git_url) {
                Ok(repo) => println!("Repo '{}' added successfully.", repo),
                Err(e @ WorkspaceError::RepoExists(_)) => println!("{}.", e),
                Err(e) => return Err(e.into()),
            }
            Ok(())
        }

        Commands::AddWorkspace { repo, workspace } => {
            match store.add_workspace(&repo, &workspace) {
                Ok(_) => println!(
                    "Workspace '{}' created for repo '{}' and repo cloned successfully.",
                    workspace, repo
                ),
                Err(
                    e @ (WorkspaceError::RepoNotFound(_)
                    | WorkspaceError::WorkspaceExists { .. }
                    | WorkspaceError::MissingUrl(_)),
                ) => println!("{}.", e),
                Err(e) => return Err(e.into()),
            }
            Ok(())
        }

        Commands::Connect {
            repo,
            workspace,
            agent,
            no_attach,
        } => connect(&config, &store, repo, workspace, agent, !no_attach),

        Commands::Attach => {
            let orchestrator = orchestrator(&config);
            match orchestrator.attach_to_session() {
                Err(SessionError::NotFound(name)) => {
                    let message = format!(
                        "No Chorus session '{}' is running. Use 'chorus connect' first.",
                        name
                    );
                    println!("{}", style(message).yellow());
                    Ok(())
                }
                other => other.context("Failed to attach to session"),
            }
        }

        Commands::Config => {
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }

        Commands::AddAgent { agent } => {
            let mut config = config;
            if config.add_agent(&agent) {
                config.save(config_path)?;
                println!("Agent '{}' added successfully.", agent);
            } else {
                println!("Agent '{}' already exists.", agent);
            }
            Ok(())
        }
    }
}

fn orchestrator(config: &Config) -> SessionOrchestrator<TmuxClient> {
    SessionOrchestrator::new(TmuxClient::default()).with_session_name(&config.session_name)
}

fn connect(
    config: &Config,
    store: &WorkspaceStore,
    repo: Option<String>,
    workspace: Option<String>,
    agent: Option<String>,
    attach: bool,
) -> Result<()> {
    println!("{}", style("Connect to a Chorus Workspace").magenta().bold());

    if !store.exists() {
        println!(
            "{}",
            style(format!(
                "Chorus storage directory ({}) does not exist.",
                store.root().display()
            ))
            .red()
        );
        return Ok(());
    }

    let repo = match repo {
        Some(repo) => repo,
        None => {
            let repos = store.list_repos()?;
            if repos.is_empty() {
                println!(
                    "{}",
                    style(format!("No repos found in {}.", store.root().display())).yellow()
                );
                return Ok(());
            }
            match prompt::select("Please choose a repo:", &repos)? {
                Some(repo) => repo,
                None => return Ok(()),
            }
        }
    };

    let workspace = match workspace {
        Some(workspace) => workspace,
        None => {
            let workspaces = store.list_workspaces(&repo)?;
            if workspaces.is_empty() {
                println!(
                    "{}",
                    style(format!("No workspaces found for repo '{}'.", repo)).yellow()
                );
                return Ok(());
            }
            match prompt::select("Please choose a workspace:", &workspaces)? {
                Some(workspace) => workspace,
                None => return Ok(()),
            }
        }
    };

    let agent = match agent {
        Some(agent) => agent,
        None => {
            if config.agents.is_empty() {
                println!(
                    "{}",
                    style("No agents configured. Please add an agent using 'chorus add-agent'.")
                        .yellow()
                );
                return Ok(());
            }
            match prompt::select("Please choose an agent:", &config.agents)? {
                Some(agent) => agent,
                None => return Ok(()),
            }
        }
    };

    let git_root = store.git_root(&repo, &workspace);
    if !git_root.is_dir() {
        anyhow::bail!(
            "Workspace checkout {} does not exist. Was 'chorus add-workspace {} {}' successful?",
            git_root.display(),
            repo,
            workspace
        );
    }

    println!(
        "Connecting to {}...",
        style(format!("{}/{}", repo, workspace)).cyan()
    );

    let orchestrator = orchestrator(config);
    if !orchestrator.multiplexer().is_available() {
        anyhow::bail!(
            "tmux not found at '{}'. Install tmux to use 'chorus connect'.",
            orchestrator.multiplexer().tmux_path()
        );
    }

    let session = orchestrator
        .create_session(&git_root, &agent)
        .context("Failed to set up tmux session")?;

    println!("Created tmux session '{}'.", style(&session.name).cyan());
    println!("Reattach later with: tmux attach -t {}", session.name);

    if attach {
        orchestrator
            .attach_to_session()
            .context("Failed to attach to session")?;
    }

    Ok(())
}
