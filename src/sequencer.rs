use crate::cursor::Cursor;
use crate::invariants::{debug_assert_no_overwrite, debug_assert_read_le_write};
use std::sync::atomic::Ordering;

/// Owns the write cursor (shared, CAS/fetch-add-incremented by producers) and
/// the read cursor (consumer-owned), enforcing "no overwrite of unread data"
/// (`SPEC_FULL.md` §4.3).
///
/// `read_cursor` initializes to `1`, not `0`: the first published sequence is
/// `0`, whose stamp is `1`, so `next_read() == 1` lines up with the first
/// cell's expected stamp without a special case in the consumer's loop
/// (Open Question #2).
pub(crate) struct Sequencer {
    write_cursor: Cursor,
    read_cursor: Cursor,
    capacity: u64,
}

impl Sequencer {
    pub(crate) fn new(capacity: u64) -> Self {
        Self {
            write_cursor: Cursor::new(0),
            read_cursor: Cursor::new(1),
            capacity,
        }
    }

    /// Reserves the next sequence. Globally unique and monotone across all
    /// producers.
    pub(crate) fn reserve(&self) -> u64 {
        self.write_cursor.increment() - 1
    }

    /// `true` iff publishing `seq` would not overwrite a slot the consumer
    /// hasn't read yet.
    ///
    /// `read_cursor` counts one higher than the number of sequences actually
    /// consumed (it starts at `1`, not `0`; see the constructor doc), so the
    /// window has to subtract that off before comparing against `capacity` —
    /// mirrors the Go original's `producer.go`, which computes `r :=
    /// atomic.LoadUint64(&q.seqer.rc) - 1` before the equivalent check.
    pub(crate) fn can_write(&self, seq: u64) -> bool {
        seq < self.read_cursor.load(Ordering::Acquire) + self.capacity - 1
    }

    /// The consumer's next expected read cursor value.
    pub(crate) fn next_read(&self) -> u64 {
        self.read_cursor.load(Ordering::Acquire)
    }

    /// Consumer-only: advances the read cursor by one, returning the new
    /// value.
    pub(crate) fn advance_read(&self) -> u64 {
        self.read_cursor.increment()
    }

    /// Unsynchronized snapshot of the write cursor, for `write_window`
    /// estimates and debug invariant checks.
    pub(crate) fn write_cursor_snapshot(&self) -> u64 {
        self.write_cursor.load(Ordering::Relaxed)
    }

    pub(crate) fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Debug-only cross-check of invariants 1 and 2 from `SPEC_FULL.md` §3.
    pub(crate) fn debug_check_invariants(&self) {
        if cfg!(debug_assertions) {
            let read = self.read_cursor.load(Ordering::Acquire);
            let write = self.write_cursor.load(Ordering::Acquire);
            debug_assert_read_le_write!(read.saturating_sub(1), write);
            debug_assert_no_overwrite!(write, read.saturating_sub(1), self.capacity);
        }
    }
}
