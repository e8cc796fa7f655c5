//! Per-frame hand-off from the byte source into the row engine.
//!
//! The order is fixed: drain the stage, ingest at the frame width, apply
//! the reanchor policy, then surface any poller fault or overflow in the
//! status line. Rendering happens afterwards in the view layer.

use crate::model::RowError;
use crate::source::ByteSource;
use crate::state::{AppState, IngestReport};
use crate::view_state::FrameGeometry;
use tracing::trace;

/// What one frame's pump did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Bytes taken from the stage.
    pub drained: usize,
    /// Effect on the row store.
    pub ingest: IngestReport,
}

/// Feed already-drained bytes into `state` at the frame width.
///
/// # Errors
///
/// Returns [`RowError::InvalidWidth`] for a zero width. [`FrameGeometry`]
/// clamps its width, so this only happens with hand-built geometry.
pub fn apply_received(
    state: &mut AppState,
    bytes: &[u8],
    geometry: FrameGeometry,
) -> Result<FrameReport, RowError> {
    let ingest = state.ingest_received(bytes, geometry.width)?;
    Ok(FrameReport {
        drained: bytes.len(),
        ingest,
    })
}

/// Run one frame's hand-off from `source` into `state`.
///
/// `scratch` is reused between frames.
///
/// # Errors
///
/// See [`apply_received`].
pub fn pump(
    state: &mut AppState,
    source: &ByteSource,
    geometry: FrameGeometry,
    scratch: &mut Vec<u8>,
) -> Result<FrameReport, RowError> {
    scratch.clear();
    source.drain_into(scratch);
    let report = apply_received(state, scratch, geometry)?;

    if let Some(fault) = source.take_fault() {
        state.set_status(fault);
    }
    let dropped = source.dropped_bytes();
    if dropped > state.dropped_bytes {
        state.dropped_bytes = dropped;
        state.set_status(format!("stage overflow: {dropped} bytes dropped"));
    }

    if report.drained > 0 {
        trace!(
            drained = report.drained,
            created = report.ingest.rows_created,
            evicted = report.ingest.rows_evicted,
            "frame pumped"
        );
    }
    Ok(report)
}
