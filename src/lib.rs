//! lmax-queue - a lock-free, bounded MPSC event queue
//!
//! A high-throughput multi-producer / single-consumer event queue built on a
//! ring buffer in the style of the LMAX Disruptor. Producers reserve and
//! publish sequences concurrently via [`Producer`]; a single consumer thread
//! drains them in strict publication order and delivers each to a
//! user-supplied [`EventHandler`], either one at a time or in batches.
//!
//! The hard engineering lives in three tightly coupled pieces: the
//! [`Sequencer`](crate::sequencer) (lock-free slot reservation with flow
//! control), the ring buffer's per-slot publication stamps (serializing
//! publication against consumption without a separate available-bit array),
//! and the consumer's staged spin/yield/park backoff, coordinated with a
//! pluggable [`BlockStrategy`].
//!
//! # Example
//!
//! ```
//! use lmax_queue::{BlockStrategy, Config, EventHandler, Lockfree, SchedYield};
//!
//! struct Sum(u64);
//! impl EventHandler<u64> for Sum {
//!     fn on_event(&mut self, value: u64) {
//!         self.0 += value;
//!     }
//! }
//!
//! let queue = Lockfree::new(Config::new(1024, 1), Sum(0), SchedYield);
//! queue.start().unwrap();
//! let producer = queue.producer();
//! producer.write(42).unwrap();
//! queue.close().unwrap();
//! ```

mod backoff;
mod block;
mod cell;
mod config;
mod consumer;
mod cursor;
mod error;
mod handler;
mod inner;
mod invariants;
mod metrics;
mod producer;
mod queue;
mod ring;
mod sequencer;

pub use block::{BlockStrategy, ChannelSignal, ConditionVar, OsYield, ProcPause, SchedYield, Sleep};
pub use config::{next_pow2, Config, HIGH_THROUGHPUT_CONFIG, LOW_LATENCY_CONFIG};
pub use error::{QueueError, Result};
pub use handler::EventHandler;
pub use metrics::MetricsSnapshot;
pub use producer::Producer;
pub use queue::Lockfree;
