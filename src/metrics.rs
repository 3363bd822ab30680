use std::sync::atomic::{AtomicU64, Ordering};

/// Optional counters for monitoring queue activity.
///
/// Mirrors the teacher's `Metrics`/`MetricsSnapshot` split (`src/metrics.rs`):
/// a live, atomically-updated counter set inside the queue, and a plain
/// `Copy` struct handed back to callers who ask for a snapshot. Recording is
/// gated by [`Config::enable_metrics`](crate::Config::with_metrics) so a
/// caller who doesn't want the extra fetch-adds on the hot path doesn't pay
/// for them.
#[derive(Debug, Default)]
pub(crate) struct Metrics {
    enabled: bool,
    messages_sent: AtomicU64,
    messages_received: AtomicU64,
    batches_sent: AtomicU64,
    batches_received: AtomicU64,
    reserve_spins: AtomicU64,
}

impl Metrics {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    #[inline]
    pub(crate) fn record_published(&self) {
        if self.enabled {
            self.messages_sent.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_consumed(&self) {
        if self.enabled {
            self.messages_received.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_batch_sent(&self) {
        if self.enabled {
            self.batches_sent.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_batch_received(&self) {
        if self.enabled {
            self.batches_received.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_reserve_spin(&self) {
        if self.enabled {
            self.reserve_spins.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            batches_sent: self.batches_sent.load(Ordering::Relaxed),
            batches_received: self.batches_received.load(Ordering::Relaxed),
            reserve_spins: self.reserve_spins.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`Metrics`]' counters, returned by
/// [`Lockfree::metrics`](crate::Lockfree::metrics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Events published via `Producer::write`/`write_timeout`/`write_by_cursor`.
    pub messages_sent: u64,
    /// Events delivered to the handler.
    pub messages_received: u64,
    /// Batches delivered via `on_batch_event`.
    pub batches_sent: u64,
    /// Reserved for symmetry with `batches_sent`; currently always equal to it
    /// (one consumer, so "sent" and "received" batch counts coincide).
    pub batches_received: u64,
    /// Number of times a producer yielded while waiting for ring space.
    pub reserve_spins: u64,
}
