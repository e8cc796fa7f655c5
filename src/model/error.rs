//! Error types for sertui.
//!
//! Errors are grouped by the layer that produces them and compose via `?` and
//! `From` conversions into [`AppError`] at the top level.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`DeviceError`] - Opening, enumerating or spawning the device poller
//!   - [`crate::config::ConfigError`] - Config file read/parse failures
//!   - [`crate::logging::LoggingError`] - Tracing subscriber setup
//!   - [`crate::view::TuiError`] - Failures inside the running TUI
//!   - `std::io::Error` - Terminal/TUI failures
//! - [`RowError`] - Precondition violations in the row engine
//!
//! # Recovery Strategy
//!
//! Device read faults after start-up are **not** errors at this level: the
//! poller logs them and hands the host a status string. A failed or empty
//! drain looks exactly like "no new data".

use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// The device could not be opened or polled.
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the TUI cannot function; the terminal is
    /// restored and the error is printed to stderr.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The TUI event loop stopped with an error.
    #[error("TUI error: {0}")]
    Tui(#[from] crate::view::TuiError),
}

/// Errors raised by the device collaborator at its boundary.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No port was given on the command line, in the environment or config.
    ///
    /// # Examples
    ///
    /// ```
    /// use sertui::model::error::DeviceError;
    ///
    /// let msg = DeviceError::NoPort.to_string();
    /// assert!(msg.contains("--list-ports"));
    /// ```
    #[error("No port selected: pass a port name or use --list-ports")]
    NoPort,

    /// The OS refused to open or configure the port.
    #[error("Unable to open port {port}: {reason}")]
    Open {
        /// Port name as given by the user.
        port: String,
        /// Driver-level reason.
        reason: String,
    },

    /// Port enumeration failed.
    #[error("Unable to enumerate ports: {0}")]
    Enumerate(String),

    /// The background poller thread could not be started.
    #[error("Unable to start device poller: {0}")]
    Spawn(#[source] std::io::Error),

    /// Generic I/O failure while talking to the device.
    #[error("Device I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Precondition violations in the row engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowError {
    /// Ingest width must be at least one column.
    ///
    /// # Examples
    ///
    /// ```
    /// use sertui::model::error::RowError;
    ///
    /// let err = RowError::InvalidWidth { width: 0 };
    /// assert!(err.to_string().contains("width"));
    /// ```
    #[error("Invalid row width {width}: must be at least 1")]
    InvalidWidth {
        /// The rejected width.
        width: usize,
    },
}
