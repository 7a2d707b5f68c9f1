//! # Tracing Example
//!
//! Shows the log events a run emits with the optional tracing feature.
//!
//! ## Running This Example
//!
//! ```bash
//! # With default log level (info)
//! cargo run --example tracing_demo --features tracing
//!
//! # With trace level (shows worker and observer completion)
//! RUST_LOG=tallyx=trace cargo run --example tracing_demo --features tracing
//! ```

use futures::executor::{block_on, ThreadPool};
use tallyx::{Coordinator, MemoryOrdering, ThreadSpawner};

use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tallyx=info")),
        )
        .init();

    println!("=== OS threads ===\n");
    let spawner = ThreadSpawner::new();
    let report = block_on(Coordinator::new().run(&spawner)).unwrap();
    println!("final value: {}\n", report.final_value);

    println!("=== futures thread pool, sequentially consistent ===\n");
    let pool = ThreadPool::new().unwrap();
    let coordinator = Coordinator::new()
        .with_iterations(10_000)
        .with_ordering(MemoryOrdering::SequentiallyConsistent);
    let report = block_on(coordinator.run(&pool)).unwrap();
    println!("final value: {}", report.final_value);
}
