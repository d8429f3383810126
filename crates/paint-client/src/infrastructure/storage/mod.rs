//! Persistent settings for the client.

pub mod config;

pub use config::{load_config, load_config_from, ClientConfig, ConfigError};
