//! TOML configuration for the watch host.
//!
//! ```toml
//! variant = "minimal"
//! inbox_size = 64
//! outbox_size = 64
//! log_level = "debug"
//! ```
//!
//! Every field is optional.  `inbox_size` and `outbox_size` default to the
//! buffer size of the selected variant (128 bytes for `full`, 64 for
//! `minimal`), so switching the variant alone is enough.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tlive_core::protocol::messages::{DICT_HEADER_SIZE, TUPLE_HEADER_SIZE};

use crate::application::{DispatcherConfig, Variant};

/// Smallest buffer that can hold a one-tuple dictionary.
pub const MIN_BUFFER_SIZE: usize = DICT_HEADER_SIZE + TUPLE_HEADER_SIZE;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
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

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A buffer size is too small to carry any message.
    #[error("{field} must be at least {min} bytes, got {value}", min = MIN_BUFFER_SIZE)]
    BufferTooSmall { field: &'static str, value: usize },
}

// ── Schema ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchConfig {
    #[serde(default)]
    pub variant: Variant,
    /// Inbound ceiling in bytes; the variant's buffer size when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbox_size: Option<usize>,
    /// Outbound ceiling in bytes; the variant's buffer size when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbox_size: Option<usize>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            inbox_size: None,
            outbox_size: None,
            log_level: default_log_level(),
        }
    }
}

impl WatchConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: WatchConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads the config at `path`.  A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects buffer sizes that cannot hold a single tuple.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("inbox_size", self.inbox_size), ("outbox_size", self.outbox_size)] {
            if let Some(value) = value {
                if value < MIN_BUFFER_SIZE {
                    return Err(ConfigError::BufferTooSmall { field, value });
                }
            }
        }
        Ok(())
    }

    /// Resolves the dispatcher settings, filling sizes from the variant.
    pub fn dispatcher_config(&self) -> DispatcherConfig {
        let defaults = DispatcherConfig::for_variant(self.variant);
        DispatcherConfig {
            inbox_size: self.inbox_size.unwrap_or(defaults.inbox_size),
            outbox_size: self.outbox_size.unwrap_or(defaults.outbox_size),
            ..defaults
        }
    }
}
