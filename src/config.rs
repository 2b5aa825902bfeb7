//! Bridge configuration
//!
//! Read from `jnicall.toml`, then overridden from the environment:
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//! directory = "/data/local/tmp/logs"
//!
//! [faults]
//! describe = false
//!
//! [arguments]
//! transient_strings = "frame_teardown"
//! ```

use crate::interop::{EnvOptions, TransientPolicy};
use crate::logging::{LogConfig, LogFormat, LogOutput};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

/// File name searched for by `Config::discover`.
pub const CONFIG_FILE: &str = "jnicall.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub faults: FaultConfig,

    #[serde(default)]
    pub arguments: ArgumentConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_format")]
    pub format: LogFormat,

    /// Write rotated files here instead of stderr.
    #[serde(default)]
    pub directory: Option<String>,

    #[serde(default = "default_prefix")]
    pub file_prefix: String,

    #[serde(default = "default_false")]
    pub span_events: bool,

    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultConfig {
    /// Dump captured exceptions through `ExceptionDescribe`.
    #[serde(default = "default_true")]
    pub describe: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentConfig {
    #[serde(default)]
    pub transient_strings: TransientPolicy,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            directory: None,
            file_prefix: default_prefix(),
            span_events: false,
            filter: None,
        }
    }
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self { describe: true }
    }
}

fn default_true() -> bool { true }
fn default_false() -> bool { false }
fn default_level() -> String { "info".to_string() }
fn default_format() -> LogFormat { LogFormat::Compact }
fn default_prefix() -> String { "jnicall".to_string() }

/// Configuration loading failure
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "Failed to access config {}: {}", path.display(), source),
            Self::Parse(err) => write!(f, "Failed to parse config: {}", err),
            Self::Serialize(err) => write!(f, "Failed to serialize config: {}", err),
            Self::Invalid { key, value } => write!(f, "Invalid value '{}' for {}", value, key),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `jnicall.toml` from the current directory or its nearest parent
    /// that has one; defaults when there is none or it does not load.
    pub fn discover() -> Self {
        std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_file(&dir))
            .and_then(|path| match Self::load(&path) {
                Ok(config) => Some(config),
                Err(err) => {
                    tracing::warn!(target: "jnicall::config", "ignoring {}: {}", path.display(), err);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Path of the nearest `jnicall.toml` at or above `start`.
    pub fn find_file(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Override from `JNICALL_*` environment variables.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override from `lookup`, which maps a `JNICALL_*` name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("JNICALL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("JNICALL_LOG_FORMAT") {
            self.logging.format = match format.to_ascii_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "compact" => LogFormat::Compact,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::Invalid { key: "JNICALL_LOG_FORMAT", value: format }),
            };
        }
        if let Some(directory) = lookup("JNICALL_LOG_FILE") {
            self.logging.directory = Some(directory).filter(|dir| !dir.is_empty());
        }
        if let Some(describe) = lookup("JNICALL_DESCRIBE_FAULTS") {
            self.faults.describe = parse_flag(&describe).ok_or(ConfigError::Invalid {
                key: "JNICALL_DESCRIBE_FAULTS",
                value: describe,
            })?;
        }
        if let Some(policy) = lookup("JNICALL_TRANSIENT_STRINGS") {
            self.arguments.transient_strings = match policy.as_str() {
                "release_after_call" => TransientPolicy::ReleaseAfterCall,
                "frame_teardown" => TransientPolicy::FrameTeardown,
                _ => return Err(ConfigError::Invalid { key: "JNICALL_TRANSIENT_STRINGS", value: policy }),
            };
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.level()?;
        Ok(())
    }

    fn level(&self) -> Result<Level, ConfigError> {
        self.logging.level.parse().map_err(|_| ConfigError::Invalid {
            key: "logging.level",
            value: self.logging.level.clone(),
        })
    }

    /// Options for `RawEnv::with_options` / `MockVm::with_options`.
    pub fn env_options(&self) -> EnvOptions {
        EnvOptions {
            describe_faults: self.faults.describe,
            transient_strings: self.arguments.transient_strings,
        }
    }

    pub fn log_config(&self) -> LogConfig {
        let output = match &self.logging.directory {
            Some(directory) => LogOutput::File {
                directory: directory.clone(),
                prefix: self.logging.file_prefix.clone(),
            },
            None => LogOutput::Stderr,
        };
        let config = LogConfig::new()
            .with_level(self.level().unwrap_or(Level::INFO))
            .with_format(self.logging.format)
            .with_output(output)
            .with_span_events(self.logging.span_events);

        match &self.logging.filter {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        }
    }

    /// Default configuration as TOML
    pub fn generate_default() -> Result<String, ConfigError> {
        toml::to_string_pretty(&Self::default()).map_err(ConfigError::Serialize)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
