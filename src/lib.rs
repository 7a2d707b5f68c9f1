//! Race-Free Shared Counting
//!
//! A small, correct concurrency primitive: one worker task increments a shared
//! counter while one observer task reads it, and a coordinator joins both and
//! reports what happened.
//!
//! # Features
//!
//! - **No data races**: the counter is a single atomic location. Updates are
//!   never lost and reads are never torn.
//! - **Defined memory ordering**: pick [`MemoryOrdering::Relaxed`],
//!   [`MemoryOrdering::AcquireRelease`] (default) or
//!   [`MemoryOrdering::SequentiallyConsistent`].
//! - **Always joined**: [`Coordinator::run`] returns only after both tasks
//!   finished, so the final value is always exact.
//! - **Runtime-agnostic**: tasks start through a [`Spawner`]. Every
//!   `futures::task::Spawn` implementor is one, and [`ThreadSpawner`] uses
//!   plain OS threads.
//! - **All-or-nothing start**: if either spawn fails, the run returns
//!   [`CounterError::SpawnFailure`] before the counter is touched.
//!
//! # Quick Start
//!
//! ```
//! use tallyx::Coordinator;
//!
//! let report = Coordinator::new().run_blocking().unwrap();
//!
//! assert_eq!(report.final_value, 1000);
//! assert_eq!(report.observed.len(), 1000);
//! assert!(report.observed.all_within(1000));
//! ```
//!
//! With an async runtime, pass a spawner:
//!
//! ```
//! use futures::executor::{block_on, ThreadPool};
//! use tallyx::{Coordinator, MemoryOrdering};
//!
//! let pool = ThreadPool::new().unwrap();
//! let coordinator = Coordinator::new()
//!     .with_iterations(10_000)
//!     .with_ordering(MemoryOrdering::Relaxed);
//!
//! let (final_value, observed) = block_on(coordinator.run(&pool)).unwrap().into_parts();
//! assert_eq!(final_value, 10_000);
//! assert_eq!(observed.len(), 10_000);
//! ```
//!
//! # What Is *Not* Guaranteed
//!
//! The observer and the worker are never synchronized with each other, only
//! with the counter. The observed sequence may contain duplicates, skip
//! values, be all zeros, or start at the final value. Each entry is a value
//! the counter really held, which is all that can be relied on:
//!
//! - `final_value == iterations`
//! - `observed.len() == iterations`
//! - every observed value lies in `0..=iterations`
//!
//! Most schedulers produce a non-decreasing sequence.
//! [`ObservedSequence::is_non_decreasing`] tells you whether a given run did,
//! but treat it as a report, never as an assertion.
//!
//! # Optional Tracing Support
//!
//! tallyx provides optional observability through the `tracing` crate with
//! **zero runtime overhead when disabled**.
//!
//! ```toml
//! [dependencies]
//! tallyx = { version = "0.1", features = ["tracing"] }
//! tracing-subscriber = "0.3"
//! ```
//!
//! ```no_run
//! use tracing_subscriber::{fmt, EnvFilter};
//!
//! fmt()
//!     .with_env_filter(
//!         EnvFilter::try_from_default_env()
//!             .unwrap_or_else(|_| EnvFilter::new("tallyx=info"))
//!     )
//!     .init();
//! ```
//!
//! ## Log Levels
//!
//! - **INFO**: run start and completion, with the final value
//! - **DEBUG**: thread starts, start gate release
//! - **TRACE**: worker and observer completion
//! - **ERROR**: spawn failures
//!
//! When the `tracing` feature is disabled (the default), every log statement
//! is removed at compile time via `#[cfg(feature = "tracing")]` and the
//! `tracing` crate isn't linked.

// Module declarations
mod coordinator;
mod counter;
mod error;
mod gate;
mod observer;
mod spawner;
mod types;
mod worker;

// Public re-exports
pub use coordinator::{Coordinator, CoordinatorConfig, RunReport, DEFAULT_ITERATIONS};
pub use counter::{MemoryOrdering, SharedCounter};
pub use error::{CounterError, CounterResult};
pub use observer::{ObservedSequence, Observer};
pub use spawner::{Spawner, ThreadSpawner};
pub use types::TaskKind;
pub use worker::Worker;
