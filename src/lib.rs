//! Chorus - Manage multiple copies of multiple repos being edited by coding agents in parallel

pub mod cli;
pub mod config;
pub mod session;
pub mod workspace;
