//! In-memory device that echoes every transmitted byte back.
//!
//! Backs `--loopback` and lets tests drive the whole hand-off without
//! hardware. Clones share one queue, so one handle can be given to the
//! poller as the reader and another to the host as the writer.

use super::{DeviceReader, DeviceWriter};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Echoing in-memory device.
#[derive(Debug, Clone, Default)]
pub struct Loopback {
    queue: Arc<Mutex<VecDeque<u8>>>,
    breaks: Arc<AtomicUsize>,
}

impl Loopback {
    /// Empty device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes as if the remote end had sent them.
    pub fn inject(&self, bytes: &[u8]) {
        self.queue().extend(bytes);
    }

    /// Bytes waiting to be read.
    pub fn pending(&self) -> usize {
        self.queue().len()
    }

    /// Number of break conditions asserted so far.
    pub fn breaks(&self) -> usize {
        self.breaks.load(Ordering::Relaxed)
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<u8>> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DeviceReader for Loopback {
    fn read_available(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let mut queue = self.queue();
        let n = queue.len();
        buf.extend(queue.drain(..));
        Ok(n)
    }
}

impl DeviceWriter for Loopback {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inject(bytes);
        Ok(())
    }

    fn send_break(&mut self) -> io::Result<()> {
        self.breaks.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
