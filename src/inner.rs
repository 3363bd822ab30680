use crate::config::Config;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::ring::RingBuffer;
use crate::sequencer::Sequencer;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::block::BlockStrategy;

pub(crate) const READY: u8 = 0;
pub(crate) const RUNNING: u8 = 1;

/// State and components shared between every [`crate::Producer`] handle and
/// the [`crate::Lockfree`] facade that owns the consumer.
///
/// Producer lifecycle (`producer_state`) is tracked separately from the
/// facade's own `Ready`/`Running` flag and from the consumer's, mirroring the
/// three independent status fields the Go original keeps on `Disruptor`,
/// `Producer`, and `consumer` (`SPEC_FULL.md` §4.7, §9).
pub(crate) struct Inner<T> {
    pub(crate) ring: RingBuffer<T>,
    pub(crate) sequencer: Sequencer,
    pub(crate) block_strategy: Arc<dyn BlockStrategy>,
    pub(crate) config: Config,
    pub(crate) metrics: Metrics,
    producer_state: AtomicU8,
}

impl<T: Copy> Inner<T> {
    pub(crate) fn new(config: Config, block_strategy: Arc<dyn BlockStrategy>) -> Self {
        Self {
            ring: RingBuffer::new(config.capacity()),
            sequencer: Sequencer::new(config.capacity() as u64),
            block_strategy,
            metrics: Metrics::new(config.enable_metrics),
            config,
            producer_state: AtomicU8::new(READY),
        }
    }

    #[inline]
    pub(crate) fn producer_closed(&self) -> bool {
        self.producer_state.load(Ordering::Acquire) == READY
    }

    pub(crate) fn start_producer(&self) -> bool {
        self.producer_state
            .compare_exchange(READY, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn close_producer(&self) -> bool {
        self.producer_state
            .compare_exchange(RUNNING, READY, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
