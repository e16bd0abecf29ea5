//! Server configuration
//!
//! Built-in defaults, optionally overlaid by a TOML file, the environment
//! and CLI flags. See [`EffectiveConfig`] for the merge order.

mod defaults;
mod effective;

pub use defaults::{
    CorsConfig, MachineConfig, NotifierConfig, NotifierKind, ServerConfig, DEFAULT_BIND,
};
pub use effective::{
    validate, CliOverrides, ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, ENV_BIND,
    ENV_TEXTBELT_KEY,
};
