use crate::backoff::SpinBackoff;
use crate::error::{QueueError, Result};
use crate::handler::EventHandler;
use crate::inner::{Inner, READY, RUNNING};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// Drives the single consumer thread: reads sequences in order, delivers
/// them to the handler (single or batched), and parks via the queue's
/// [`BlockStrategy`](crate::BlockStrategy) when starved (`SPEC_FULL.md`
/// §4.5).
pub(crate) struct Consumer<T> {
    inner: Arc<Inner<T>>,
    handler: Arc<Mutex<Box<dyn EventHandler<T> + Send>>>,
    state: Arc<AtomicU8>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Copy + Send + 'static> Consumer<T> {
    pub(crate) fn new(inner: Arc<Inner<T>>, handler: Box<dyn EventHandler<T> + Send>) -> Self {
        Self {
            inner,
            handler: Arc::new(Mutex::new(handler)),
            state: Arc::new(AtomicU8::new(READY)),
            thread: Mutex::new(None),
        }
    }

    /// Transitions `Ready -> Running` and spawns the drain thread.
    pub(crate) fn start(&self) -> Result<()> {
        if self
            .state
            .compare_exchange(READY, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(QueueError::StartError {
                component: "consumer",
            });
        }

        let inner = Arc::clone(&self.inner);
        let handler = Arc::clone(&self.handler);
        let state = Arc::clone(&self.state);
        let join = std::thread::Builder::new()
            .name("lockfree-consumer".to_string())
            .spawn(move || Self::drain(&inner, &handler, &state))
            .expect("failed to spawn consumer thread");

        *self.thread.lock().unwrap_or_else(|e| e.into_inner()) = Some(join);
        Ok(())
    }

    /// Transitions `Running -> Ready`, releases the block strategy to unstick
    /// a parked consumer, and joins the drain thread.
    pub(crate) fn close(&self) -> Result<()> {
        if self
            .state
            .compare_exchange(RUNNING, READY, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(QueueError::CloseError {
                component: "consumer",
            });
        }
        self.inner.block_strategy.release();
        if let Some(join) = self.thread.lock().unwrap_or_else(|e| e.into_inner()).take() {
            let _ = join.join();
        }
        Ok(())
    }

    fn drain(
        inner: &Arc<Inner<T>>,
        handler: &Arc<Mutex<Box<dyn EventHandler<T> + Send>>>,
        state: &Arc<AtomicU8>,
    ) {
        let mut handler = handler.lock().unwrap_or_else(|e| e.into_inner());
        let batch_size = inner.config.batch_size();
        let mut batch: Vec<T> = if batch_size > 1 {
            Vec::with_capacity(batch_size)
        } else {
            Vec::new()
        };
        let mut backoff = SpinBackoff::new();
        let mut next = inner.sequencer.next_read();

        loop {
            if state.load(Ordering::Acquire) == READY {
                return;
            }

            match inner.ring.read(next - 1) {
                Some(value) => {
                    if batch_size <= 1 {
                        handler.on_event(value);
                    } else {
                        batch.push(value);
                        if batch.len() >= batch_size {
                            handler.on_batch_event(&batch);
                            inner.metrics.record_batch_sent();
                            inner.metrics.record_batch_received();
                            batch.clear();
                        }
                    }
                    next = inner.sequencer.advance_read();
                    inner.metrics.record_consumed();
                    inner.sequencer.debug_check_invariants();
                    backoff.reset();
                }
                None => {
                    if !batch.is_empty() {
                        handler.on_batch_event(&batch);
                        inner.metrics.record_batch_sent();
                        inner.metrics.record_batch_received();
                        batch.clear();
                    }
                    if backoff.step() {
                        let stamp = inner.ring.stamp_at(next - 1);
                        inner.block_strategy.block(stamp, next);
                    }
                    if state.load(Ordering::Acquire) == READY {
                        return;
                    }
                }
            }
        }
    }
}
