//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod history;
mod layout;
mod send_bar;
pub mod styles;

pub use history::render_history_overlay;
pub use layout::render_layout;
pub use send_bar::SendBar;
pub use styles::{ColorConfig, RowStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::integration;
use crate::model::{KeyAction, RowError};
use crate::source::ByteSource;
use crate::state::{AppState, InputMode};
use crate::view_state::FrameGeometry;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Size assumed when the backend cannot report one.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Row engine rejected a frame's geometry
    #[error("Row error: {0}")]
    Row(#[from] RowError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    source: ByteSource,
    key_bindings: KeyBindings,
    styles: RowStyles,
    /// Drain buffer reused across frames
    scratch: Vec<u8>,
    frame_interval: Duration,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        app_state: AppState,
        source: ByteSource,
        styles: RowStyles,
        frame_interval: Duration,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            app_state,
            source,
            key_bindings: KeyBindings::default(),
            styles,
            scratch: Vec::new(),
            frame_interval,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Each pass waits at most one
    /// frame interval for input, then pumps the stage and redraws.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(self.frame_interval)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!("Handling resize to {}x{}", width, height);
                    }
                    _ => {}
                }
            }

            self.pump()?;
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Row geometry for the current terminal size.
    fn geometry(&self) -> FrameGeometry {
        let (cols, rows) = match self.terminal.size() {
            Ok(size) => (size.width, size.height),
            Err(_) => FALLBACK_SIZE,
        };
        FrameGeometry::from_terminal(cols, rows, self.app_state.timestamps)
    }

    /// Move staged device bytes into the row store.
    fn pump(&mut self) -> Result<(), TuiError> {
        let geometry = self.geometry();
        integration::pump(&mut self.app_state, &self.source, geometry, &mut self.scratch)?;
        Ok(())
    }

    /// Write `payload` to the device and echo it on success.
    fn transmit(&mut self, payload: &str) {
        if payload.is_empty() {
            return;
        }
        match self.source.send(payload.as_bytes()) {
            Ok(()) => self.app_state.record_transmit(payload),
            Err(e) => {
                warn!(error = %e, "send failed");
                self.app_state.set_status(format!("send failed: {e}"));
            }
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C quits from every mode
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if key.code == KeyCode::Esc {
            self.app_state.mode = InputMode::View;
            return false;
        }

        match self.app_state.mode {
            InputMode::Send => {
                self.handle_send_key(key);
                false
            }
            InputMode::History => {
                self.handle_history_key(key);
                false
            }
            InputMode::View => match self.key_bindings.get(key) {
                Some(action) => self.apply_action(action),
                None => false,
            },
        }
    }

    fn handle_send_key(&mut self, key: KeyEvent) {
        // Control chords still reach the send options (line ending, break)
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(action @ (KeyAction::CycleLineEnding | KeyAction::SendBreak)) =
                self.key_bindings.get(key)
            {
                self.apply_action(action);
            }
            return;
        }

        match key.code {
            KeyCode::Char(ch) if self.app_state.send.send_on_type() => {
                let payload = self.app_state.send.typed_payload(ch);
                self.transmit(&payload);
            }
            KeyCode::Char(ch) => self.app_state.send.insert(ch),
            KeyCode::Backspace => self.app_state.send.backspace(),
            KeyCode::Left => self.app_state.send.cursor_left(),
            KeyCode::Right => self.app_state.send.cursor_right(),
            KeyCode::Enter => {
                let line = self.app_state.send.text().to_string();
                let payload = self.app_state.send.take_payload();
                self.transmit(&payload);
                self.app_state.history.push(line);
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.app_state.history.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.app_state.history.select_next(),
            KeyCode::Enter => self.app_state.recall_history(),
            KeyCode::Char('d') => {
                self.app_state.history.remove_selected();
                if self.app_state.history.is_empty() {
                    self.app_state.mode = InputMode::View;
                }
            }
            _ => {}
        }
    }

    /// Apply a bound action. Returns true if app should quit.
    fn apply_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::ScrollUp
            | KeyAction::ScrollDown
            | KeyAction::ScrollUpFast
            | KeyAction::ScrollDownFast
            | KeyAction::ScrollToLatest => {
                let rows_visible = self.geometry().rows_visible;
                self.app_state.scroll(action, rows_visible);
            }
            KeyAction::EnterSendMode => self.app_state.set_mode(InputMode::Send),
            KeyAction::ToggleHistory => self.app_state.set_mode(InputMode::History),
            KeyAction::ToggleTimestamps => self.app_state.toggle_timestamps(),
            KeyAction::ClearRows => self.app_state.clear(),
            KeyAction::CycleLineEnding => {
                self.app_state.send.cycle_line_ending();
                let label = self.app_state.send.line_ending().label().trim_start();
                self.app_state.set_status(format!("line ending: {label}"));
            }
            KeyAction::ToggleUpperOnSend => self.app_state.send.toggle_upper_on_send(),
            KeyAction::ToggleSendOnType => self.app_state.send.toggle_send_on_type(),
            KeyAction::SendBreak => match self.source.send_break() {
                Ok(()) => self.app_state.set_status("break sent"),
                Err(e) => {
                    warn!(error = %e, "break failed");
                    self.app_state.set_status(format!("break failed: {e}"));
                }
            },
            KeyAction::TogglePause => {
                self.app_state.paused = !self.app_state.paused;
                self.source.set_paused(self.app_state.paused);
                info!(paused = self.app_state.paused, "device polling toggled");
            }
            KeyAction::Quit => return true,
        }
        false
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, state, styles);
        })?;
        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.
//
// DO NOT use these in production code.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Skips terminal initialization so any backend can be used.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        source: ByteSource,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            terminal,
            app_state,
            source,
            key_bindings,
            styles: RowStyles::with_color_config(ColorConfig::with_colors(true)),
            scratch: Vec::new(),
            frame_interval: Duration::from_millis(16),
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Get mutable reference to app state (test-only accessor)
    pub(crate) fn app_state_mut(&mut self) -> &mut AppState {
        &mut self.app_state
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Run one frame's pump (test-only accessor)
    pub(crate) fn pump_test(&mut self) -> Result<(), TuiError> {
        self.pump()
    }

    /// Render a single frame (test-only accessor)
    ///
    /// Calls the internal draw() method to render the current state
    /// to the TestBackend. Useful for snapshot testing.
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application with a byte source
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    source: ByteSource,
    port_label: String,
    config: &ResolvedConfig,
    color_config: ColorConfig,
) -> Result<(), TuiError> {
    let app_state = AppState::new(port_label, &config.app_options());
    let styles = RowStyles::with_color_config(color_config);
    let mut app = TuiApp::new(app_state, source, styles, config.frame_interval())?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    app.source.shutdown();
    info!("session ended");
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
