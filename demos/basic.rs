//! Minimal single-producer, single-consumer walkthrough.

use lmax_queue::{Config, EventHandler, Lockfree, SchedYield};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct PrintingHandler {
    count: Arc<AtomicU64>,
}

impl EventHandler<u64> for PrintingHandler {
    fn on_event(&mut self, value: u64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        println!("received {value}");
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let count = Arc::new(AtomicU64::new(0));
    let queue = Lockfree::new(
        Config::new(16, 1),
        PrintingHandler {
            count: Arc::clone(&count),
        },
        SchedYield,
    );

    queue.start().expect("start");
    let producer = queue.producer();
    for value in 0..10 {
        producer.write(value).expect("write");
    }

    std::thread::sleep(Duration::from_millis(50));
    queue.close().expect("close");
    println!("delivered {} events", count.load(Ordering::Relaxed));
}
