//! Chorus configuration module
//! Handles loading, saving, and managing the config file

pub mod config;

pub use config::{expand_home, Config, CONFIG_ENV};
