use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Pluggable park/wake primitive the consumer engages once it has exhausted
/// its spin and yield stages (`SPEC_FULL.md` §4.5.1, §4.6).
///
/// `block` is handed the stamp cell the consumer is waiting on and the stamp
/// value that would mean the wait is over. An implementation that actually
/// parks MUST re-check `stamp` after registering itself as parked and before
/// waiting — a producer's release landing between the consumer's last miss
/// and the call to `block` must not be lost (Open Question #1 in
/// `SPEC_FULL.md` §9). `ProcPause` and `Sleep` don't park at all, so they
/// have no lost-wakeup hazard to guard against.
pub trait BlockStrategy: Send + Sync {
    /// Waits for `stamp` to reach `expected`, or returns early as a latency
    /// vs. CPU-usage tradeoff (spin/yield/sleep variants always return).
    fn block(&self, stamp: &AtomicU64, expected: u64);

    /// Wakes a consumer that may be parked in `block`. Cheap no-op for the
    /// spin/yield/sleep variants, which never park.
    fn release(&self);
}

/// Yields the current thread to the scheduler; lowest idle latency among the
/// non-busy-spin strategies, at the cost of never truly sleeping.
#[derive(Debug, Default)]
pub struct SchedYield;

impl BlockStrategy for SchedYield {
    fn block(&self, _stamp: &AtomicU64, _expected: u64) {
        std::thread::yield_now();
    }

    fn release(&self) {}
}

/// Sleeps for a fixed duration. Minimizes CPU at the cost of wake latency.
#[derive(Debug, Clone, Copy)]
pub struct Sleep(pub Duration);

impl BlockStrategy for Sleep {
    fn block(&self, _stamp: &AtomicU64, _expected: u64) {
        std::thread::sleep(self.0);
    }

    fn release(&self) {}
}

/// Executes `n` CPU-pause instructions per call. Lowest latency under high
/// CPU availability; burns a core outright.
#[derive(Debug, Clone, Copy)]
pub struct ProcPause(pub u32);

impl BlockStrategy for ProcPause {
    fn block(&self, _stamp: &AtomicU64, _expected: u64) {
        for _ in 0..self.0 {
            std::hint::spin_loop();
        }
    }

    fn release(&self) {}
}

/// Yields to the OS scheduler.
///
/// The Go original distinguishes `runtime.Gosched()` (goroutine-scheduler
/// yield, no syscall) from `osyield()` (a platform-specific OS thread yield).
/// Rust has no goroutine scheduler to yield to short of the OS thread
/// scheduler, so both `SchedYield` and `OsYield` collapse to
/// `std::thread::yield_now()` here; they are kept as distinct types so
/// callers that picked one deliberately in the original still have a home
/// (see DESIGN.md).
#[derive(Debug, Default)]
pub struct OsYield;

impl BlockStrategy for OsYield {
    fn block(&self, _stamp: &AtomicU64, _expected: u64) {
        std::thread::yield_now();
    }

    fn release(&self) {}
}

/// Parks on a bounded signal channel, guarded by a CAS'd "parked" flag so a
/// `release` racing the park never gets lost.
pub struct ChannelSignal {
    parked: AtomicBool,
    tx: SyncSender<()>,
    rx: Mutex<Receiver<()>>,
}

impl ChannelSignal {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = sync_channel(1);
        Self {
            parked: AtomicBool::new(false),
            tx,
            rx: Mutex::new(rx),
        }
    }
}

impl Default for ChannelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStrategy for ChannelSignal {
    fn block(&self, stamp: &AtomicU64, expected: u64) {
        if self
            .parked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // Someone else already has the parked slot; nothing to do.
            return;
        }
        if stamp.load(Ordering::Acquire) == expected {
            // Published between the earlier miss and here: don't wait. If a
            // release already landed and flipped the flag back, drain its
            // signal so it doesn't leak into the next park.
            if self
                .parked
                .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                let _ = self.rx.lock().unwrap_or_else(|e| e.into_inner()).recv();
            }
            return;
        }
        let _ = self.rx.lock().unwrap_or_else(|e| e.into_inner()).recv();
    }

    fn release(&self) {
        if self
            .parked
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let _ = self.tx.try_send(());
        }
    }
}

/// Parks on a condition variable, re-checking the stamp under the lock
/// before waiting so a `release`'s broadcast can't land in the gap between
/// the consumer's last miss and acquiring the mutex.
pub struct ConditionVar {
    mutex: Mutex<()>,
    condvar: Condvar,
}

impl ConditionVar {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mutex: Mutex::new(()),
            condvar: Condvar::new(),
        }
    }
}

impl Default for ConditionVar {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockStrategy for ConditionVar {
    fn block(&self, stamp: &AtomicU64, expected: u64) {
        let guard = self.mutex.lock().unwrap_or_else(|e| e.into_inner());
        if stamp.load(Ordering::Acquire) == expected {
            return;
        }
        let _ = self.condvar.wait(guard);
    }

    fn release(&self) {
        let _guard = self.mutex.lock().unwrap_or_else(|e| e.into_inner());
        self.condvar.notify_all();
    }
}
