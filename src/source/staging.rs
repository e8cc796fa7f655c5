//! Bounded byte hand-off between the device poller and the UI loop.
//!
//! The poller appends under the lock; the UI loop copies and clears under
//! the same lock once per frame. The consumer never waits: when the poller
//! holds the lock the frame simply sees no new bytes.

use serde::Deserialize;
use std::sync::{Mutex, MutexGuard, TryLockError};
use tracing::trace;

/// Default stage size in bytes.
pub const DEFAULT_STAGING_CAPACITY: usize = 8192;

/// What happens to bytes that do not fit in the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Discard the oldest staged bytes to make room.
    #[default]
    DropOldest,
    /// Discard the incoming bytes that do not fit.
    DropNewest,
}

#[derive(Debug, Default)]
struct Stage {
    bytes: Vec<u8>,
    dropped: u64,
}

/// Fixed-capacity byte stage shared by one producer and one consumer.
#[derive(Debug)]
pub struct StagingBuffer {
    inner: Mutex<Stage>,
    capacity: usize,
    policy: OverflowPolicy,
}

impl StagingBuffer {
    /// Empty stage holding at most `capacity` bytes.
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        Self {
            inner: Mutex::new(Stage {
                bytes: Vec::with_capacity(capacity),
                dropped: 0,
            }),
            capacity,
            policy,
        }
    }

    /// Maximum staged bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Overflow policy in force.
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Stage `incoming`, applying the overflow policy.
    ///
    /// Returns the number of bytes dropped by this call.
    pub fn push(&self, incoming: &[u8]) -> usize {
        if incoming.is_empty() {
            return 0;
        }
        let mut stage = self.lock();
        let free = self.capacity - stage.bytes.len();

        let dropped = match self.policy {
            OverflowPolicy::DropNewest => {
                let take = incoming.len().min(free);
                stage.bytes.extend_from_slice(&incoming[..take]);
                incoming.len() - take
            }
            OverflowPolicy::DropOldest => {
                // Only the newest `capacity` bytes of `incoming` can survive
                let keep = incoming.len().min(self.capacity);
                let skipped = incoming.len() - keep;
                let evict = keep.saturating_sub(free);
                stage.bytes.drain(..evict);
                stage.bytes.extend_from_slice(&incoming[skipped..]);
                skipped + evict
            }
        };

        if dropped > 0 {
            stage.dropped += dropped as u64;
            trace!(dropped, policy = ?self.policy, "stage overflow");
        }
        dropped
    }

    /// Copy out and clear everything staged.
    ///
    /// Returns an empty vector when the producer currently holds the lock;
    /// those bytes stay staged for the next call.
    pub fn drain(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.drain_into(&mut out);
        out
    }

    /// Append everything staged to `out` and clear the stage.
    ///
    /// Returns the number of bytes moved; 0 when the lock is contended.
    pub fn drain_into(&self, out: &mut Vec<u8>) -> usize {
        let mut stage = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return 0,
        };
        let moved = stage.bytes.len();
        out.extend_from_slice(&stage.bytes);
        stage.bytes.clear();
        moved
    }

    /// Bytes currently staged.
    pub fn len(&self) -> usize {
        self.lock().bytes.len()
    }

    /// True when nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total bytes dropped by overflow since creation.
    pub fn dropped(&self) -> u64 {
        self.lock().dropped
    }

    fn lock(&self) -> MutexGuard<'_, Stage> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for StagingBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_STAGING_CAPACITY, OverflowPolicy::default())
    }
}
