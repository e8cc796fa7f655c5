//! Row and chrome styling.
//!
//! Received rows are white, sent rows cyan (blue when the timestamp column is
//! hidden), timestamps green.

use crate::model::Direction;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Explicit setting, bypassing the environment.
    pub fn with_colors(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== RowStyles =====

/// Styles applied to rendered rows.
///
/// Without colors, sent rows are bold so the two directions stay apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyles {
    timestamp: Style,
    rx: Style,
    tx: Style,
    tx_untimed: Style,
}

impl RowStyles {
    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                timestamp: Style::default().fg(Color::Green),
                rx: Style::default().fg(Color::White),
                tx: Style::default().fg(Color::Cyan),
                tx_untimed: Style::default().fg(Color::Blue),
            }
        } else {
            let bold = Style::default().add_modifier(Modifier::BOLD);
            Self {
                timestamp: Style::default(),
                rx: Style::default(),
                tx: bold,
                tx_untimed: bold,
            }
        }
    }

    /// Style of the timestamp prefix.
    pub fn timestamp(&self) -> Style {
        self.timestamp
    }

    /// Style of row text for `direction`.
    pub fn text(&self, direction: Direction, timestamps: bool) -> Style {
        match (direction, timestamps) {
            (Direction::Rx, _) => self.rx,
            (Direction::Tx, true) => self.tx,
            (Direction::Tx, false) => self.tx_untimed,
        }
    }
}

impl Default for RowStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
