//! Effective configuration with provenance
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. TOML file (`--config`)
//! 3. Environment (`WASHLINE_BIND`, `WASHLINE_TEXTBELT_KEY`)
//! 4. CLI flags

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use super::defaults::{NotifierKind, ServerConfig};

/// Environment variable overriding the listen address.
pub const ENV_BIND: &str = "WASHLINE_BIND";

/// Environment variable carrying the Textbelt API key.
pub const ENV_TEXTBELT_KEY: &str = "WASHLINE_TEXTBELT_KEY";

/// Upper bound for any configured duration (one day).
const MAX_SECONDS: u64 = 86_400;

/// Upper bound for the audit log size.
const MAX_LOG_ENTRIES: usize = 10_000;

/// Origin of a configuration layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Env,
    Cli,
}

/// A contributing layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (file layer only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<String>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("bind must be a socket address, got '{value}'")]
    InvalidBind { value: String },

    #[error("heartbeat_timeout_seconds must be in (0, 86400], got {value}")]
    HeartbeatTimeoutOutOfBounds { value: u64 },

    #[error("abort_grace_seconds must be in (0, 86400], got {value}")]
    AbortGraceOutOfBounds { value: u64 },

    #[error("max_log_entries must be in [1, 10000], got {value}")]
    LogCapacityOutOfBounds { value: usize },

    #[error("notifier timeout_seconds must be in (0, 300], got {value}")]
    NotifierTimeoutOutOfBounds { value: u64 },

    #[error("textbelt notifier requires a phone number")]
    MissingPhone,
}

/// Merged configuration plus the layers that produced it
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub config: ServerConfig,
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Build from the process environment.
    pub fn build(file: Option<&Path>, cli: &CliOverrides) -> Result<Self, ConfigError> {
        Self::build_with_env(file, cli, |name| std::env::var(name).ok())
    }

    /// Build with an explicit environment lookup.
    pub fn build_with_env(
        file: Option<&Path>,
        cli: &CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = ServerConfig::default();
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
        }];

        if let Some(path) = file {
            config = Self::load_toml_file(path)?;
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
            });
        }

        let mut from_env = false;
        if let Some(bind) = env(ENV_BIND).filter(|v| !v.is_empty()) {
            config.bind = bind;
            from_env = true;
        }
        if let Some(key) = env(ENV_TEXTBELT_KEY).filter(|v| !v.is_empty()) {
            config.notifier.key = Some(key);
            from_env = true;
        }
        if from_env {
            sources.push(ConfigSource {
                origin: ConfigOrigin::Env,
                path: None,
            });
        }

        if let Some(bind) = &cli.bind {
            config.bind = bind.clone();
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
            });
        }

        validate(&config)?;
        Ok(Self { config, sources })
    }

    /// Load and parse a TOML file
    fn load_toml_file(path: &Path) -> Result<ServerConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })
    }

    /// Copy with credentials masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.config.notifier.key.is_some() {
            copy.config.notifier.key = Some("[REDACTED]".to_string());
        }
        copy
    }
}

/// Check bounds and cross-field requirements.
pub fn validate(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.bind.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::InvalidBind {
            value: config.bind.clone(),
        });
    }

    let machine = &config.machine;
    if machine.heartbeat_timeout_seconds == 0 || machine.heartbeat_timeout_seconds > MAX_SECONDS {
        return Err(ConfigError::HeartbeatTimeoutOutOfBounds {
            value: machine.heartbeat_timeout_seconds,
        });
    }
    if machine.abort_grace_seconds == 0 || machine.abort_grace_seconds > MAX_SECONDS {
        return Err(ConfigError::AbortGraceOutOfBounds {
            value: machine.abort_grace_seconds,
        });
    }
    if machine.max_log_entries == 0 || machine.max_log_entries > MAX_LOG_ENTRIES {
        return Err(ConfigError::LogCapacityOutOfBounds {
            value: machine.max_log_entries,
        });
    }

    let notifier = &config.notifier;
    if notifier.timeout_seconds == 0 || notifier.timeout_seconds > 300 {
        return Err(ConfigError::NotifierTimeoutOutOfBounds {
            value: notifier.timeout_seconds,
        });
    }
    if notifier.kind == NotifierKind::Textbelt
        && notifier.phone.as_deref().map_or(true, str::is_empty)
    {
        return Err(ConfigError::MissingPhone);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_builtin_only() {
        let effective = EffectiveConfig::build_with_env(None, &CliOverrides::default(), no_env).unwrap();
        assert_eq!(effective.config, ServerConfig::default());
        assert_eq!(effective.sources.len(), 1);
        assert_eq!(effective.sources[0].origin, ConfigOrigin::Builtin);
    }

    #[test]
    fn test_layers_apply_in_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
bind = "127.0.0.1:7000"

[machine]
heartbeat_timeout_seconds = 30

[notifier]
kind = "textbelt"
phone = "+15555555555"
key = "from-file"
"#
        )
        .unwrap();

        let env = |name: &str| match name {
            ENV_TEXTBELT_KEY => Some("from-env".to_string()),
            _ => None,
        };
        let cli = CliOverrides {
            bind: Some("127.0.0.1:9000".to_string()),
        };
        let effective = EffectiveConfig::build_with_env(Some(file.path()), &cli, env).unwrap();

        assert_eq!(effective.config.bind, "127.0.0.1:9000");
        assert_eq!(effective.config.machine.heartbeat_timeout_seconds, 30);
        assert_eq!(effective.config.notifier.key.as_deref(), Some("from-env"));
        let origins: Vec<_> = effective.sources.iter().map(|s| s.origin).collect();
        assert_eq!(
            origins,
            vec![ConfigOrigin::Builtin, ConfigOrigin::File, ConfigOrigin::Env, ConfigOrigin::Cli]
        );
    }

    #[test]
    fn test_redacted_hides_key() {
        let env = |name: &str| (name == ENV_TEXTBELT_KEY).then(|| "secret".to_string());
        let effective = EffectiveConfig::build_with_env(None, &CliOverrides::default(), env).unwrap();
        let shown = serde_json::to_string(&effective.redacted()).unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("[REDACTED]"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EffectiveConfig::build_with_env(
            Some(Path::new("/nonexistent/washline.toml")),
            &CliOverrides::default(),
            no_env,
        );
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bind = ").unwrap();
        let result = EffectiveConfig::build_with_env(Some(file.path()), &CliOverrides::default(), no_env);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validate_bounds() {
        let mut config = ServerConfig::default();
        config.machine.heartbeat_timeout_seconds = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::HeartbeatTimeoutOutOfBounds { value: 0 })
        ));

        let mut config = ServerConfig::default();
        config.machine.abort_grace_seconds = 100_000;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::AbortGraceOutOfBounds { .. })
        ));

        let mut config = ServerConfig::default();
        config.machine.max_log_entries = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::LogCapacityOutOfBounds { value: 0 })
        ));

        let mut config = ServerConfig::default();
        config.bind = "not-an-address".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidBind { .. })));
    }

    #[test]
    fn test_textbelt_needs_phone() {
        let mut config = ServerConfig::default();
        config.notifier.kind = NotifierKind::Textbelt;
        assert!(matches!(validate(&config), Err(ConfigError::MissingPhone)));

        config.notifier.phone = Some("+15555555555".to_string());
        assert!(validate(&config).is_ok());
    }
}
