use std::num::NonZeroUsize;
use std::sync::OnceLock;

fn cpu_count() -> usize {
    static CPUS: OnceLock<usize> = OnceLock::new();
    *CPUS.get_or_init(|| {
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    })
}

/// Staged spin/yield counter the consumer runs through before handing off to
/// a `BlockStrategy`.
///
/// Mirrors the `activeSpin = 4` / `passiveSpin = 2` thresholds from the
/// original `bruceshao/lockfree` source (`util.go`): a few tens of CPU-pause
/// spins, then a couple of scheduler yields, before parking
/// (`SPEC_FULL.md` §4.5.1). `activeSpin` is `0` on single-CPU systems, where
/// spinning only steals time from the one core that could be running the
/// producer.
pub(crate) struct SpinBackoff {
    spins: u32,
    spin_threshold: u32,
    passive_spin: u32,
}

impl SpinBackoff {
    pub(crate) fn new() -> Self {
        let spin_threshold = if cpu_count() > 1 { 4 } else { 0 };
        Self {
            spins: 0,
            spin_threshold,
            passive_spin: 2,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.spins = 0;
    }

    /// Advances one step of the backoff. Returns `true` once both spin
    /// stages are exhausted, signaling the caller should engage the
    /// `BlockStrategy`.
    pub(crate) fn step(&mut self) -> bool {
        if self.spins < self.spin_threshold {
            std::hint::spin_loop();
            self.spins += 1;
            false
        } else if self.spins < self.spin_threshold + self.passive_spin {
            std::thread::yield_now();
            self.spins += 1;
            false
        } else {
            true
        }
    }
}
