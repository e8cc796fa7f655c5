//! Background task that moves device bytes into the stage on a fixed tick.

use super::staging::StagingBuffer;
use super::DeviceReader;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Name of the poller thread.
pub const POLLER_THREAD_NAME: &str = "device-poller";

/// Default tick between device reads.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// State shared between the poller and its owner.
#[derive(Debug, Default)]
pub struct PollerShared {
    /// Set once to stop the poller after its current tick.
    pub shutdown: AtomicBool,
    /// While set the poller skips reads but keeps ticking.
    pub paused: AtomicBool,
    /// Most recent read failure, taken by the UI loop.
    pub fault: Mutex<Option<String>>,
}

impl PollerShared {
    /// Replace the recorded fault.
    pub fn record_fault(&self, message: String) {
        *self.fault.lock().unwrap_or_else(|e| e.into_inner()) = Some(message);
    }

    /// Take the recorded fault, leaving none.
    pub fn take_fault(&self) -> Option<String> {
        self.fault.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

/// Read whatever the device has and stage it.
///
/// `scratch` is reused between ticks and left empty. Returns the bytes read.
pub fn tick(
    reader: &mut dyn DeviceReader,
    stage: &StagingBuffer,
    scratch: &mut Vec<u8>,
) -> std::io::Result<usize> {
    scratch.clear();
    let read = reader.read_available(scratch)?;
    if read > 0 {
        stage.push(scratch);
    }
    scratch.clear();
    Ok(read)
}

/// Start the poller thread.
///
/// The first failure of a run of read errors is logged at warn level and
/// recorded as a fault; repeats are logged at debug level until a read
/// succeeds again.
///
/// # Errors
///
/// Returns the OS error if the thread cannot be spawned.
pub fn spawn(
    mut reader: Box<dyn DeviceReader>,
    stage: Arc<StagingBuffer>,
    shared: Arc<PollerShared>,
    interval: Duration,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(POLLER_THREAD_NAME.into())
        .spawn(move || {
            debug!(?interval, "poller started");
            let mut scratch = Vec::new();
            let mut failing = false;

            while !shared.shutdown.load(Ordering::Acquire) {
                if !shared.paused.load(Ordering::Acquire) {
                    match tick(reader.as_mut(), &stage, &mut scratch) {
                        Ok(_) if failing => {
                            info!("device reads recovered");
                            failing = false;
                        }
                        Ok(_) => {}
                        Err(e) if failing => debug!(error = %e, "device read failed again"),
                        Err(e) => {
                            warn!(error = %e, "device read failed");
                            shared.record_fault(format!("read error: {e}"));
                            failing = true;
                        }
                    }
                }
                thread::sleep(interval);
            }
            debug!("poller stopped");
        })
}
