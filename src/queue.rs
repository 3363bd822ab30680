use crate::block::BlockStrategy;
use crate::config::Config;
use crate::consumer::Consumer;
use crate::error::{QueueError, Result};
use crate::handler::EventHandler;
use crate::inner::{Inner, READY, RUNNING};
use crate::metrics::MetricsSnapshot;
use crate::producer::Producer;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Composes the sequencer, ring buffer, producer, and consumer into a single
/// bounded MPSC event queue (`SPEC_FULL.md` §4.7).
///
/// Construct with [`Lockfree::new`], call [`start`](Self::start) to spawn the
/// consumer thread, obtain [`Producer`] handles via [`producer`](Self::producer)
/// for any number of writer tasks, and [`close`](Self::close) to shut down.
/// `Ready` and `Running` are the only two lifecycle states; any transition
/// attempted from the wrong state is rejected with a formatted error rather
/// than silently ignored.
pub struct Lockfree<T> {
    inner: Arc<Inner<T>>,
    consumer: Consumer<T>,
    state: AtomicU8,
}

impl<T: Copy + Send + 'static> Lockfree<T> {
    /// Builds a new queue. `config.capacity()` has already been rounded up to
    /// a power of two by [`Config::new`]; `handler` runs on the consumer
    /// thread spawned by [`start`](Self::start); `block_strategy` is shared
    /// by every producer handle and the consumer.
    pub fn new(
        config: Config,
        handler: impl EventHandler<T> + 'static,
        block_strategy: impl BlockStrategy + 'static,
    ) -> Self {
        let inner = Arc::new(Inner::new(config, Arc::new(block_strategy)));
        let consumer = Consumer::new(Arc::clone(&inner), Box::new(handler));
        Self {
            inner,
            consumer,
            state: AtomicU8::new(READY),
        }
    }

    /// Starts the consumer thread and marks the producer side `Running`.
    /// Idempotent failure: calling `start` on an already-running queue
    /// returns [`QueueError::StartError`] without disturbing its state.
    pub fn start(&self) -> Result<()> {
        if self
            .state
            .compare_exchange(READY, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(QueueError::StartError { component: "queue" });
        }

        if let Err(e) = self.consumer.start() {
            self.state.store(READY, Ordering::Release);
            return Err(e);
        }

        if !self.inner.start_producer() {
            self.state.store(READY, Ordering::Release);
            return Err(QueueError::StartError {
                component: "producer",
            });
        }

        tracing::debug!("lockfree queue started");
        Ok(())
    }

    /// Marks the producer side `Ready` (rejecting new writes), then closes
    /// the consumer, releasing the block strategy to unstick a parked
    /// consumer and joining its thread.
    pub fn close(&self) -> Result<()> {
        if self
            .state
            .compare_exchange(RUNNING, READY, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(QueueError::CloseError { component: "queue" });
        }

        if !self.inner.close_producer() {
            self.state.store(RUNNING, Ordering::Release);
            return Err(QueueError::CloseError {
                component: "producer",
            });
        }

        if let Err(e) = self.consumer.close() {
            self.state.store(RUNNING, Ordering::Release);
            return Err(e);
        }

        tracing::debug!("lockfree queue closed");
        Ok(())
    }

    /// Returns a new producer handle sharing this queue's ring, sequencer,
    /// and block strategy. Cheap to call repeatedly or clone across tasks.
    #[must_use]
    pub fn producer(&self) -> Producer<T> {
        Producer::new(Arc::clone(&self.inner))
    }

    /// `true` iff the queue is currently `Running`.
    #[must_use]
    pub fn running(&self) -> bool {
        self.state.load(Ordering::Acquire) == RUNNING
    }

    /// Snapshot of the optional counters enabled via
    /// [`Config::with_metrics`]. Always returns a (possibly all-zero)
    /// snapshot; check [`Config::with_metrics`] at construction to know
    /// whether the counts are meaningful.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.inner.metrics_snapshot()
    }
}
