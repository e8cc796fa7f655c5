//! Serial terminal TUI (sertui)
//!
//! TUI client for a serial port: incoming bytes become fixed-width rows in
//! a bounded, scrollable timeline, sent lines are merged into the same
//! timeline, and a short history of sent commands is kept.
//!
//! Follows the Pure Core / Impure Shell architecture: `model`, `state` and
//! `view_state` are plain data and transitions, `source` and `view` own the
//! device thread and the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

// Re-export main loop integration
pub mod integration;
