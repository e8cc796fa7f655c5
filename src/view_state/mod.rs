//! View-state layer: scroll position, frame geometry, row rendering.
//!
//! # Module Structure
//!
//! - `viewport`: ViewportCursor - tracking or fixed scroll position
//! - `types`: FrameGeometry - row width and visible rows per frame
//! - `renderer`: pure projection of the visible window into styled lines

pub mod renderer;
pub mod types;
pub mod viewport;

pub use renderer::render_rows;
pub use types::FrameGeometry;
pub use viewport::ViewportCursor;
