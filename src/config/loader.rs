//! Configuration file loading with precedence handling.

use crate::model::{DataBits, DeviceError, LineEnding, Parity, PortSettings, StopBits};
use crate::source::{OverflowPolicy, SourceOptions, DEFAULT_STAGING_CAPACITY};
use crate::state::history::DEFAULT_HISTORY_CAPACITY;
use crate::state::{AppOptions, DEFAULT_ROW_CAPACITY};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SERTUI_CONFIG";
/// Environment variable overriding the port.
pub const PORT_ENV: &str = "SERTUI_PORT";
/// Environment variable overriding the baud rate.
pub const BAUD_ENV: &str = "SERTUI_BAUD";

/// Default line speed.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting is syntactically fine but out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Config key or environment variable.
        field: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/sertui/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Port to open when none is given on the command line.
    #[serde(default)]
    pub port: Option<String>,

    /// Line speed.
    #[serde(default)]
    pub baud_rate: Option<u32>,

    /// Bits per character (5-8).
    #[serde(default)]
    pub data_bits: Option<u8>,

    /// Stop bits (1 or 2).
    #[serde(default)]
    pub stop_bits: Option<u8>,

    /// Parity: "none", "odd" or "even".
    #[serde(default)]
    pub parity: Option<Parity>,

    /// Line ending appended on send: "crlf", "lf", "cr" or "none".
    #[serde(default)]
    pub line_ending: Option<LineEnding>,

    /// Rows kept in scrollback.
    #[serde(default)]
    pub max_rows: Option<usize>,

    /// Size of the poller hand-off buffer in bytes.
    #[serde(default)]
    pub staging_capacity: Option<usize>,

    /// "drop-oldest" or "drop-newest".
    #[serde(default)]
    pub overflow_policy: Option<OverflowPolicy>,

    /// Milliseconds between device reads.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// Milliseconds between redraws.
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,

    /// Show the timestamp column on startup.
    #[serde(default)]
    pub timestamps: Option<bool>,

    /// Keep a scrolled-back view in place while rows arrive.
    #[serde(default)]
    pub hold_scrollback: Option<bool>,

    /// Lines kept in the send history.
    #[serde(default)]
    pub history_capacity: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Port to open, if any source named one.
    pub port: Option<String>,
    /// Line speed.
    pub baud_rate: u32,
    /// Bits per character.
    pub data_bits: DataBits,
    /// Stop bits.
    pub stop_bits: StopBits,
    /// Parity.
    pub parity: Parity,
    /// Line ending appended on send.
    pub line_ending: LineEnding,
    /// Rows kept in scrollback.
    pub max_rows: usize,
    /// Hand-off buffer size.
    pub staging_capacity: usize,
    /// Hand-off overflow policy.
    pub overflow_policy: OverflowPolicy,
    /// Tick between device reads.
    pub poll_interval_ms: u64,
    /// Tick between redraws.
    pub frame_interval_ms: u64,
    /// Timestamp column visible on startup.
    pub timestamps: bool,
    /// Scrollback hold policy.
    pub hold_scrollback: bool,
    /// Send history size.
    pub history_capacity: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DataBits::default(),
            stop_bits: StopBits::default(),
            parity: Parity::default(),
            line_ending: LineEnding::default(),
            max_rows: DEFAULT_ROW_CAPACITY,
            staging_capacity: DEFAULT_STAGING_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
            poll_interval_ms: 5,
            frame_interval_ms: 16,
            timestamps: true,
            hold_scrollback: true,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Settings for opening the configured port.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NoPort`] when no port was configured.
    pub fn port_settings(&self) -> Result<PortSettings, DeviceError> {
        let path = self.port.clone().ok_or(DeviceError::NoPort)?;
        Ok(PortSettings {
            path,
            baud_rate: self.baud_rate,
            data_bits: self.data_bits,
            stop_bits: self.stop_bits,
            parity: self.parity,
        })
    }

    /// Options for the UI state.
    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            max_rows: self.max_rows,
            history_capacity: self.history_capacity,
            line_ending: self.line_ending,
            timestamps: self.timestamps,
            hold_scrollback: self.hold_scrollback,
        }
    }

    /// Options for the byte source.
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            staging_capacity: self.staging_capacity,
            overflow_policy: self.overflow_policy,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    /// Redraw interval.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/sertui/sertui.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("sertui").join("sertui.log")
    } else {
        PathBuf::from("sertui.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/sertui/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sertui").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SERTUI_CONFIG` environment variable
/// 3. Default path `~/.config/sertui/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

fn data_bits_from(n: u8, field: &str) -> Result<DataBits, ConfigError> {
    DataBits::from_number(n).ok_or_else(|| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("{n} is not one of 5, 6, 7, 8"),
    })
}

fn stop_bits_from(n: u8, field: &str) -> Result<StopBits, ConfigError> {
    StopBits::from_number(n).ok_or_else(|| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("{n} is not one of 1, 2"),
    })
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for out-of-range framing settings.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    Ok(ResolvedConfig {
        port: config.port.or(defaults.port),
        baud_rate: config.baud_rate.unwrap_or(defaults.baud_rate),
        data_bits: match config.data_bits {
            Some(n) => data_bits_from(n, "data_bits")?,
            None => defaults.data_bits,
        },
        stop_bits: match config.stop_bits {
            Some(n) => stop_bits_from(n, "stop_bits")?,
            None => defaults.stop_bits,
        },
        parity: config.parity.unwrap_or(defaults.parity),
        line_ending: config.line_ending.unwrap_or(defaults.line_ending),
        max_rows: config.max_rows.unwrap_or(defaults.max_rows),
        staging_capacity: config.staging_capacity.unwrap_or(defaults.staging_capacity),
        overflow_policy: config.overflow_policy.unwrap_or(defaults.overflow_policy),
        poll_interval_ms: config.poll_interval_ms.unwrap_or(defaults.poll_interval_ms),
        frame_interval_ms: config
            .frame_interval_ms
            .unwrap_or(defaults.frame_interval_ms),
        timestamps: config.timestamps.unwrap_or(defaults.timestamps),
        hold_scrollback: config.hold_scrollback.unwrap_or(defaults.hold_scrollback),
        history_capacity: config.history_capacity.unwrap_or(defaults.history_capacity),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SERTUI_PORT`: Override port
/// - `SERTUI_BAUD`: Override baud rate
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] when `SERTUI_BAUD` is not a number.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(port) = std::env::var(PORT_ENV) {
        config.port = Some(port);
    }

    if let Ok(baud) = std::env::var(BAUD_ENV) {
        config.baud_rate = baud.trim().parse().map_err(|e| ConfigError::InvalidValue {
            field: BAUD_ENV.to_string(),
            reason: format!("{baud:?}: {e}"),
        })?;
    }

    Ok(config)
}

/// Command-line values that override every other source.
///
/// `None` / `false` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Positional port argument.
    pub port: Option<String>,
    /// `--baud`
    pub baud_rate: Option<u32>,
    /// `--data-bits`
    pub data_bits: Option<u8>,
    /// `--stop-bits`
    pub stop_bits: Option<u8>,
    /// `--parity`
    pub parity: Option<Parity>,
    /// `--line-ending`
    pub line_ending: Option<LineEnding>,
    /// `--no-timestamps`
    pub no_timestamps: bool,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for out-of-range framing flags.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    cli: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(port) = cli.port {
        config.port = Some(port);
    }
    if let Some(baud) = cli.baud_rate {
        config.baud_rate = baud;
    }
    if let Some(n) = cli.data_bits {
        config.data_bits = data_bits_from(n, "--data-bits")?;
    }
    if let Some(n) = cli.stop_bits {
        config.stop_bits = stop_bits_from(n, "--stop-bits")?;
    }
    if let Some(parity) = cli.parity {
        config.parity = parity;
    }
    if let Some(line_ending) = cli.line_ending {
        config.line_ending = line_ending;
    }
    if cli.no_timestamps {
        config.timestamps = false;
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
