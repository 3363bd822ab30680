//! Runs the same producer/consumer workload under each `BlockStrategy`
//! variant, to show the latency/CPU tradeoff the queue exposes.

use lmax_queue::{
    ChannelSignal, Config, ConditionVar, EventHandler, Lockfree, OsYield, ProcPause, SchedYield,
    Sleep,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Counter(Arc<AtomicU64>);

impl EventHandler<u64> for Counter {
    fn on_event(&mut self, _value: u64) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

fn run_with<B: lmax_queue::BlockStrategy + 'static>(name: &str, strategy: B) {
    let count = Arc::new(AtomicU64::new(0));
    let queue = Lockfree::new(Config::new(1024, 1), Counter(Arc::clone(&count)), strategy);
    queue.start().expect("start");
    let producer = queue.producer();

    let start = Instant::now();
    for value in 0..100_000u64 {
        producer.write(value).expect("write");
    }
    while count.load(Ordering::Relaxed) < 100_000 {
        std::thread::yield_now();
    }
    let elapsed = start.elapsed();
    queue.close().expect("close");

    println!("{name:>14}: delivered {} events in {elapsed:?}", count.load(Ordering::Relaxed));
}

fn main() {
    run_with("SchedYield", SchedYield);
    run_with("OsYield", OsYield);
    run_with("ProcPause", ProcPause(64));
    run_with("Sleep", Sleep(Duration::from_micros(50)));
    run_with("ChannelSignal", ChannelSignal::new());
    run_with("ConditionVar", ConditionVar::new());
}
