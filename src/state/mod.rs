//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod history;
pub mod row_store;
pub mod send_input;

// Re-export for convenience
pub use app_state::{AppOptions, AppState, InputMode};
pub use history::CommandHistory;
pub use row_store::{IngestReport, RowStore, DEFAULT_ROW_CAPACITY};
pub use send_input::SendInput;
