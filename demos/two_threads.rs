//! # Two Threads, One Counter
//!
//! One thread increments a shared counter 1000 times while another reads it
//! 1000 times, then both are joined and the readings are printed.
//!
//! ```bash
//! cargo run --example two_threads
//! cargo run --example two_threads -- 50
//! ```
//!
//! The optional argument sets the iteration count.

use tallyx::{Coordinator, DEFAULT_ITERATIONS};

fn main() {
    let iterations = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_ITERATIONS);

    let report = match Coordinator::new().with_iterations(iterations).run_blocking() {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let line: Vec<String> = report.observed.iter().map(u64::to_string).collect();
    println!("{}", line.join(" "));

    println!();
    println!("final value:    {}", report.final_value);
    println!("reads:          {}", report.observed.len());
    println!("distinct reads: {}", report.observed.distinct_values().len());
    println!("non-decreasing: {}", report.observed.is_non_decreasing());
}
