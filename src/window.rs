//! Fixed-capacity access window.
//!
//! The window is a ring of the most recent `(key fingerprint, class)` pairs.
//! Request-serving threads append with [`AccessWindow::feed`]; analysis takes
//! a point-in-time copy with [`AccessWindow::snapshot`] and walks it outside
//! the feed lock. One mutex guards the ring, so feed and snapshot never
//! interleave and a snapshot never observes a half-written record.

use parking_lot::{Mutex, MutexGuard};

use crate::error::ProfilerError;

/// Identifier of a size class. The domain is a small dense integer range.
pub type ClassId = u8;

/// One recorded access: a 64-bit key fingerprint and its size class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessRecord {
    /// Fingerprint of the request key (see [`crate::fingerprint`]).
    pub key_hash: u64,
    /// Size class the key belongs to.
    pub class_id: ClassId,
}

/// Ring storage plus write cursor. Always exactly `capacity` slots long.
struct Ring {
    buf: Vec<AccessRecord>,
    /// Next write slot in `[0, capacity)`.
    head: usize,
    /// Number of valid records, `min(total_writes, capacity)`.
    size: usize,
}

impl Ring {
    fn push(&mut self, record: AccessRecord) {
        if self.buf.is_empty() {
            return;
        }
        self.buf[self.head] = record;
        self.head = (self.head + 1) % self.buf.len();
        if self.size < self.buf.len() {
            self.size += 1;
        }
    }
}

/// Concurrency-safe ring of recent accesses.
///
/// Feed is O(1) under the ring lock. Snapshot copies the ring into a
/// preallocated scratch buffer while holding the ring lock, then releases it;
/// the scratch stays borrowed by the returned [`WindowSnapshot`], so at most
/// one snapshot is live at a time (additional queriers block, feeders do
/// not).
pub struct AccessWindow {
    ring: Mutex<Ring>,
    scratch: Mutex<Vec<AccessRecord>>,
    capacity: usize,
}

impl AccessWindow {
    /// Create a window holding up to `capacity` records.
    pub fn new(capacity: usize) -> Result<Self, ProfilerError> {
        if capacity < 1 {
            return Err(ProfilerError::InvalidCapacity(capacity));
        }
        Ok(Self {
            ring: Mutex::new(Ring {
                buf: vec![AccessRecord::default(); capacity],
                head: 0,
                size: 0,
            }),
            scratch: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        })
    }

    /// Record one access. Never fails; the oldest record is overwritten once
    /// the window is full.
    pub fn feed(&self, key_hash: u64, class_id: ClassId) {
        self.ring.lock().push(AccessRecord { key_hash, class_id });
    }

    /// Take a point-in-time copy of the window.
    ///
    /// The copy is consistent with some prefix of the feed schedule: it is
    /// taken under the same lock feed uses, so no torn or interleaved state
    /// is observable. The ring lock is released before this returns; feeding
    /// continues while the snapshot is analyzed.
    pub fn snapshot(&self) -> WindowSnapshot<'_> {
        let mut scratch = self.scratch.lock();
        let head;
        let size;
        {
            let ring = self.ring.lock();
            scratch.clear();
            scratch.extend_from_slice(&ring.buf);
            head = ring.head;
            size = ring.size;
        }
        WindowSnapshot {
            buf: scratch,
            head,
            size,
        }
    }

    /// Forget all recorded accesses. Storage is retained.
    pub fn reset(&self) {
        let mut ring = self.ring.lock();
        ring.head = 0;
        ring.size = 0;
    }

    /// Number of records currently in the window.
    pub fn len(&self) -> usize {
        self.ring.lock().size
    }

    /// Whether the window holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of records the window can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// A point-in-time copy of the access window.
///
/// Holds the profiler's scratch buffer for its lifetime; drop it to let the
/// next snapshot reuse the buffer.
pub struct WindowSnapshot<'a> {
    buf: MutexGuard<'a, Vec<AccessRecord>>,
    head: usize,
    size: usize,
}

impl WindowSnapshot<'_> {
    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Records in logical order, oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = AccessRecord> + '_ {
        let cap = self.buf.len();
        // A full ring starts at head (the next overwrite victim is the
        // oldest record); a partial one starts at slot 0.
        let start = if self.size < cap { 0 } else { self.head };
        (0..self.size).map(move |i| self.buf[(start + i) % cap])
    }
}
