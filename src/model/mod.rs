//! Domain model types (pure).
//!
//! All types in this module are plain data with no I/O.

pub mod error;
pub mod key_action;
pub mod line_ending;
pub mod port;
pub mod row;

// Re-export for convenience
pub use error::{AppError, DeviceError, RowError};
pub use key_action::KeyAction;
pub use line_ending::LineEnding;
pub use port::{DataBits, Parity, PortSettings, StopBits};
pub use row::{Direction, Row, TERMINATOR};
