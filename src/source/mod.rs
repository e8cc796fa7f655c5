//! Device input and output.
//!
//! This module provides the byte source feeding the row engine:
//! - `DeviceReader` / `DeviceWriter` traits at the OS boundary
//! - Serial port and in-memory loopback adapters
//! - `ByteSource`, which owns the poller thread, the staging buffer and
//!   the write half

use crate::model::{DeviceError, PortSettings};
use std::io;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info, warn};

pub mod loopback;
pub mod poller;
pub mod serial;
pub mod staging;

pub use loopback::Loopback;
pub use poller::PollerShared;
pub use staging::{OverflowPolicy, StagingBuffer, DEFAULT_STAGING_CAPACITY};

/// Non-blocking read half of a device.
pub trait DeviceReader: Send {
    /// Append the bytes that are available right now to `buf`.
    ///
    /// Returns the number of bytes appended; 0 when nothing is pending.
    fn read_available(&mut self, buf: &mut Vec<u8>) -> io::Result<usize>;
}

/// Write half of a device.
pub trait DeviceWriter: Send {
    /// Transmit `bytes`, bounded by the device write timeout.
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Assert a break condition on the line.
    fn send_break(&mut self) -> io::Result<()>;
}

/// Tuning for a [`ByteSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOptions {
    /// Stage size in bytes.
    pub staging_capacity: usize,
    /// What to drop when the stage is full.
    pub overflow_policy: OverflowPolicy,
    /// Tick between device reads.
    pub poll_interval: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            staging_capacity: DEFAULT_STAGING_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
            poll_interval: poller::DEFAULT_POLL_INTERVAL,
        }
    }
}

/// A running device: poller thread, staging buffer and write half.
///
/// Dropping the source stops and joins the poller.
pub struct ByteSource {
    stage: Arc<StagingBuffer>,
    shared: Arc<PollerShared>,
    writer: Box<dyn DeviceWriter>,
    poller: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteSource")
            .field("stage", &self.stage)
            .field("running", &self.poller.is_some())
            .finish_non_exhaustive()
    }
}

impl ByteSource {
    /// Start polling `reader` and keep `writer` for transmissions.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Spawn`] if the poller thread cannot start.
    pub fn spawn(
        reader: Box<dyn DeviceReader>,
        writer: Box<dyn DeviceWriter>,
        options: &SourceOptions,
    ) -> Result<Self, DeviceError> {
        let stage = Arc::new(StagingBuffer::new(
            options.staging_capacity,
            options.overflow_policy,
        ));
        let shared = Arc::new(PollerShared::default());
        let handle = poller::spawn(
            reader,
            Arc::clone(&stage),
            Arc::clone(&shared),
            options.poll_interval,
        )
        .map_err(DeviceError::Spawn)?;

        Ok(Self {
            stage,
            shared,
            writer,
            poller: Some(handle),
        })
    }

    /// Open a serial port and start polling it.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Open`] or [`DeviceError::Spawn`].
    pub fn open_serial(settings: &PortSettings, options: &SourceOptions) -> Result<Self, DeviceError> {
        let (reader, writer) = serial::open(settings)?;
        Self::spawn(Box::new(reader), Box::new(writer), options)
    }

    /// Start an echoing in-memory device. The returned handle shares its
    /// queue and can inject bytes as the remote end.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Spawn`] if the poller thread cannot start.
    pub fn loopback(options: &SourceOptions) -> Result<(Self, Loopback), DeviceError> {
        let device = Loopback::new();
        let source = Self::spawn(
            Box::new(device.clone()),
            Box::new(device.clone()),
            options,
        )?;
        info!("started loopback device");
        Ok((source, device))
    }

    /// Copy and clear the staged bytes. Never blocks.
    pub fn drain(&self) -> Vec<u8> {
        self.stage.drain()
    }

    /// Append the staged bytes to `out` and clear the stage. Never blocks.
    pub fn drain_into(&self, out: &mut Vec<u8>) -> usize {
        self.stage.drain_into(out)
    }

    /// Transmit `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Io`] when the write fails or times out.
    pub fn send(&mut self, bytes: &[u8]) -> Result<(), DeviceError> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.writer.send(bytes).map_err(|e| {
            warn!(error = %e, len = bytes.len(), "device write failed");
            DeviceError::Io(e)
        })
    }

    /// Assert a break condition.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Io`] when the driver refuses.
    pub fn send_break(&mut self) -> Result<(), DeviceError> {
        debug!("sending break");
        self.writer.send_break().map_err(DeviceError::Io)
    }

    /// Suspend or resume device reads.
    pub fn set_paused(&self, paused: bool) {
        self.shared.paused.store(paused, Ordering::Release);
        debug!(paused, "poller pause changed");
    }

    /// Whether device reads are suspended.
    pub fn is_paused(&self) -> bool {
        self.shared.paused.load(Ordering::Acquire)
    }

    /// Most recent read failure since the last call, if any.
    pub fn take_fault(&self) -> Option<String> {
        self.shared.take_fault()
    }

    /// Bytes discarded by stage overflow since start.
    pub fn dropped_bytes(&self) -> u64 {
        self.stage.dropped()
    }

    /// Stop the poller and wait for it. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.poller.take() {
            if handle.join().is_err() {
                warn!("device poller panicked");
            }
            debug!("device poller joined");
        }
    }
}

impl Drop for ByteSource {
    fn drop(&mut self) {
        self.shutdown();
    }
}
