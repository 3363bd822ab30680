use crate::error::{QueueError, Result};
use crate::inner::Inner;
use std::sync::Arc;
use std::time::Instant;

/// Stateless facade for publishing events into the queue
/// (`SPEC_FULL.md` §4.4).
///
/// Cheap to clone: every handle shares the same [`Inner`] via `Arc`, so any
/// number of producer tasks can hold one concurrently. A producer never
/// parks — it spins/yields while the ring is full, trading producer latency
/// for a simpler, always-responsive consumer wakeup path.
pub struct Producer<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Copy> Producer<T> {
    pub(crate) fn new(inner: Arc<Inner<T>>) -> Self {
        Self { inner }
    }

    /// Publishes `value`, spinning/yielding until the ring has room.
    ///
    /// Returns [`QueueError::Closed`] if the queue was closed before or
    /// during the wait for space.
    pub fn write(&self, value: T) -> Result<()> {
        if self.inner.producer_closed() {
            return Err(QueueError::Closed);
        }
        let seq = self.inner.sequencer.reserve();
        loop {
            if self.inner.sequencer.can_write(seq) {
                self.publish(seq, value);
                return Ok(());
            }
            std::thread::yield_now();
            self.inner.metrics.record_reserve_spin();
            if self.inner.producer_closed() {
                return Err(QueueError::Closed);
            }
        }
    }

    /// Unsynchronized estimate of free slots: positive means room to
    /// publish without spinning; zero or negative means the ring is full,
    /// with the magnitude the overcommit (`SPEC_FULL.md` §4.4.2). Useful for
    /// a discard-on-full caller that doesn't want to spin at all.
    #[must_use]
    pub fn write_window(&self) -> i64 {
        let read = self.inner.sequencer.next_read() as i64;
        let write = self.inner.sequencer.write_cursor_snapshot() as i64;
        let capacity = self.inner.sequencer.capacity() as i64;
        read + capacity - (write + 1)
    }

    /// Reserves a sequence and races publication against `deadline`.
    ///
    /// Returns `Ok((seq, true))` once published, or `Ok((seq, false))` if
    /// `deadline` passes first — in which case `seq` has already been
    /// consumed from the reservation pool and **must** be completed later
    /// via [`write_by_cursor`](Self::write_by_cursor), or the consumer will
    /// stall forever waiting for it (`SPEC_FULL.md` §4.4.3).
    pub fn write_timeout(&self, value: T, deadline: Instant) -> Result<(u64, bool)> {
        if self.inner.producer_closed() {
            return Err(QueueError::Closed);
        }
        let seq = self.inner.sequencer.reserve();
        loop {
            if self.inner.sequencer.can_write(seq) {
                self.publish(seq, value);
                return Ok((seq, true));
            }
            if Instant::now() >= deadline {
                return Ok((seq, false));
            }
            std::thread::yield_now();
            self.inner.metrics.record_reserve_spin();
            if self.inner.producer_closed() {
                return Err(QueueError::Closed);
            }
        }
    }

    /// Completes a previously reserved sequence (from
    /// [`write_timeout`](Self::write_timeout)). Non-blocking: returns
    /// `Ok(false)` without publishing if the slot isn't writable yet, so the
    /// caller can retry or back off (`SPEC_FULL.md` §4.4.4).
    pub fn write_by_cursor(&self, value: T, seq: u64) -> Result<bool> {
        if self.inner.producer_closed() {
            return Err(QueueError::Closed);
        }
        if self.inner.sequencer.can_write(seq) {
            self.publish(seq, value);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn publish(&self, seq: u64, value: T) {
        self.inner.ring.write(seq, value);
        self.inner.block_strategy.release();
        self.inner.metrics.record_published();
        self.inner.sequencer.debug_check_invariants();
    }
}
