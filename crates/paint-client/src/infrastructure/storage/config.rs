//! TOML-based configuration for the paint client.
//!
//! Looked up at the platform-appropriate path:
//! - Windows:  `%APPDATA%\MultiplayerPaint\config.toml`
//! - Linux:    `~/.config/multiplayer-paint/config.toml`
//! - macOS:    `~/Library/Application Support/MultiplayerPaint/config.toml`
//!
//! ```toml
//! [network]
//! host = "paint.example.org"
//! port = 5303
//!
//! [session]
//! tick_rate_hz = 60
//! sync_timeout_ms = 2000
//! log_level = "info"
//! ```
//!
//! Every field has a serde default, so a missing file, a missing section, or
//! a missing key all fall back to the values above.

use std::path::{Path, PathBuf};
use std::time::Duration;

use paint_core::protocol::commands::DEFAULT_PORT;
use paint_core::SessionConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::network::DEFAULT_RECV_BUFFER;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not usable.
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub session: SessionSettings,
}

/// Where the relay lives and how the socket reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// Relay host name or IP address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Relay UDP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Receive buffer size in bytes; longer datagrams are truncated.
    #[serde(default = "default_recv_buffer_size")]
    pub recv_buffer_size: usize,
}

/// Tick pacing and session behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    /// Frames per second; every frame is one tick.
    #[serde(default = "default_tick_rate_hz")]
    pub tick_rate_hz: u32,
    /// How long to wait for inbound traffic after a Connect.
    #[serde(default = "default_sync_timeout_ms")]
    pub sync_timeout_ms: u64,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_recv_buffer_size() -> usize {
    DEFAULT_RECV_BUFFER
}
fn default_tick_rate_hz() -> u32 {
    60
}
fn default_sync_timeout_ms() -> u64 {
    2000
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            recv_buffer_size: default_recv_buffer_size(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tick_rate_hz: default_tick_rate_hz(),
            sync_timeout_ms: default_sync_timeout_ms(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Rejects values the client cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "network.host",
                reason: "must not be empty".to_string(),
            });
        }
        if self.network.recv_buffer_size == 0 {
            return Err(ConfigError::Invalid {
                field: "network.recv_buffer_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1..=1000).contains(&self.session.tick_rate_hz) {
            return Err(ConfigError::Invalid {
                field: "session.tick_rate_hz",
                reason: format!("{} is outside 1..=1000", self.session.tick_rate_hz),
            });
        }
        Ok(())
    }

    /// Interval between ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.session.tick_rate_hz.max(1)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            sync_timeout: Duration::from_millis(self.session.sync_timeout_ms),
        }
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the config from the platform path, or defaults if there is none.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    match config_file_path() {
        Ok(path) => load_config_from(&path),
        Err(_) => Ok(ClientConfig::default()),
    }
}

/// Loads the config at `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<ClientConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("MultiplayerPaint"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("MultiplayerPaint")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("multiplayer-paint"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_local_relay_on_5303() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.network.host, "127.0.0.1");
        assert_eq!(cfg.network.port, 5303);
        assert_eq!(cfg.network.recv_buffer_size, 65536);
    }

    #[test]
    fn test_default_session_settings() {
        let cfg = SessionSettings::default();
        assert_eq!(cfg.tick_rate_hz, 60);
        assert_eq!(cfg.sync_timeout_ms, 2000);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: ClientConfig = toml::from_str("").expect("deserialize");
        assert_eq!(cfg, ClientConfig::default());
    }

    #[test]
    fn test_partial_network_overrides_defaults() {
        // Arrange
        let toml_str = r#"
            [network]
            host = "paint.example.org"
        "#;

        // Act
        let cfg: ClientConfig = toml::from_str(toml_str).expect("deserialize");

        // Assert
        assert_eq!(cfg.network.host, "paint.example.org");
        assert_eq!(cfg.network.port, 5303);
        assert_eq!(cfg.session, SessionSettings::default());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut cfg = ClientConfig::default();
        cfg.network.port = 9000;
        cfg.session.tick_rate_hz = 30;

        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: ClientConfig = toml::from_str(&toml_str).expect("deserialize");

        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let path = std::env::temp_dir().join(format!("paint-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[network\nport = ").expect("write fixture");

        let result = load_config_from(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("paint-config-that-does-not-exist.toml");
        let cfg = load_config_from(&path).expect("missing file is not an error");
        assert_eq!(cfg, ClientConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_tick_rate() {
        let mut cfg = ClientConfig::default();
        cfg.session.tick_rate_hz = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "session.tick_rate_hz", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut cfg = ClientConfig::default();
        cfg.network.host = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_tick_interval_at_60_hz() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.tick_interval(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_session_config_uses_sync_timeout() {
        let mut cfg = ClientConfig::default();
        cfg.session.sync_timeout_ms = 750;
        assert_eq!(cfg.session_config().sync_timeout, Duration::from_millis(750));
    }
}
