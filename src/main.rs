//! Chorus - Manage multiple copies of multiple repos being edited by coding agents in parallel

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chorus=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting Chorus v{}", env!("CARGO_PKG_VERSION"));

    // Run CLI
    chorus::cli::run()?;

    Ok(())
}
