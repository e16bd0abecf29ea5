//! Configuration schema and built-in defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Full server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address the HTTP server listens on
    pub bind: String,

    /// Machine timing and audit settings
    pub machine: MachineConfig,

    /// Cross-origin policy for the web UI
    pub cors: CorsConfig,

    /// Outbound alert channel
    pub notifier: NotifierConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            machine: MachineConfig::default(),
            cors: CorsConfig::default(),
            notifier: NotifierConfig::default(),
        }
    }
}

/// Timing thresholds and log size for the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Silence tolerated from a running machine (default: 20)
    pub heartbeat_timeout_seconds: u64,

    /// Time an aborted cycle may wait for pickup before locking (default: 600)
    pub abort_grace_seconds: u64,

    /// Audit entries kept (default: 50)
    pub max_log_entries: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            heartbeat_timeout_seconds: 20,
            abort_grace_seconds: 10 * 60,
            max_log_entries: 50,
        }
    }
}

/// CORS settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins; `["*"]` allows any
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Which alert channel to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// Drop alerts
    None,
    /// Write alerts to the server log
    #[default]
    Log,
    /// Send alerts as SMS through Textbelt
    Textbelt,
}

/// Alert channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifierConfig {
    pub kind: NotifierKind,

    /// Endpoint override (Textbelt default when unset)
    pub url: Option<String>,

    /// Destination phone number, E.164
    pub phone: Option<String>,

    /// API key; prefer the `WASHLINE_TEXTBELT_KEY` environment variable
    pub key: Option<String>,

    /// Per-request timeout (default: 10)
    pub timeout_seconds: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            kind: NotifierKind::default(),
            url: None,
            phone: None,
            key: None,
            timeout_seconds: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_machine_constants() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "0.0.0.0:5000");
        assert_eq!(config.machine.heartbeat_timeout_seconds, 20);
        assert_eq!(config.machine.abort_grace_seconds, 600);
        assert_eq!(config.machine.max_log_entries, 50);
        assert_eq!(config.cors.allowed_origins, vec!["*"]);
        assert_eq!(config.notifier.kind, NotifierKind::Log);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [machine]
            abort_grace_seconds = 300
            "#,
        )
        .unwrap();
        assert_eq!(config.machine.abort_grace_seconds, 300);
        assert_eq!(config.machine.heartbeat_timeout_seconds, 20);
        assert_eq!(config.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: Result<ServerConfig, _> = toml::from_str("heartbeat = 5\n");
        assert!(result.is_err());
    }
}
