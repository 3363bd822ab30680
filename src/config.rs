/// Configuration for the queue.
///
/// Unlike the ring-decomposed teacher, which takes a `ring_bits` exponent plus
/// a separate `max_producers` (one ring per producer), this queue is a single
/// shared ring reserved via CAS across all producers, so the only knobs are
/// the ring's capacity and the consumer's batch size (`SPEC_FULL.md` §10.2).
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Requested ring buffer capacity. Rounded up to the next power of two
    /// (minimum 2) when the queue is constructed; see [`next_pow2`].
    capacity: usize,
    /// Consumer batch size. `<= 1` means deliver one event at a time via
    /// `on_event`; `> 1` accumulates up to this many events before calling
    /// `on_batch_event`.
    batch_size: usize,
    /// Enable the optional `Metrics` counters (slight overhead per op).
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a new configuration. `capacity` is rounded up to a power of two.
    pub const fn new(capacity: usize, batch_size: usize) -> Self {
        Self {
            capacity: next_pow2(capacity),
            batch_size,
            enable_metrics: false,
        }
    }

    /// Enables metrics collection on this configuration.
    #[must_use]
    pub const fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Effective ring buffer capacity (always a power of two, >= 2).
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Mask used to translate a sequence into a ring index.
    #[inline]
    pub const fn mask(&self) -> u64 {
        (self.capacity - 1) as u64
    }

    /// Consumer batch size as configured (may be `<= 1`).
    #[inline]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// `true` if the consumer delivers one event at a time.
    #[inline]
    pub const fn is_single_event(&self) -> bool {
        self.batch_size <= 1
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(4096, 1)
    }
}

/// Low latency preset: small ring that stays resident in L1, single-event delivery.
pub const LOW_LATENCY_CONFIG: Config = Config::new(1024, 1);

/// High throughput preset: large ring, batched delivery to amortize handler overhead.
pub const HIGH_THROUGHPUT_CONFIG: Config = Config::new(1 << 20, 256);

/// Rounds `v` up to the next power of two, with a floor of 2.
///
/// `0` and negative-equivalent inputs (callers passing a signed size cast to
/// `usize` that underflowed) round to `2`, matching the `minSuitableCap`
/// behavior in the original `bruceshao/lockfree` source: any capacity that
/// cannot stand on its own as a power of two >= 2 becomes the smallest one
/// that can.
#[must_use]
pub const fn next_pow2(v: usize) -> usize {
    if v <= 2 {
        return 2;
    }
    let mut x = v - 1;
    x |= x >> 1;
    x |= x >> 2;
    x |= x >> 4;
    x |= x >> 8;
    x |= x >> 16;
    x |= x >> 32;
    x + 1
}
