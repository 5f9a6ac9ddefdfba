//! CLI module

pub mod commands;
pub mod prompt;

pub fn run() -> anyhow::Result<()> {
    commands::run()
}
