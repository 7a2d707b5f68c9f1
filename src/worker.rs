//! The producer task.

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::counter::SharedCounter;

/// Increments a [`SharedCounter`] a fixed number of times.
///
/// The loop never sleeps or yields; how it interleaves with readers is up to
/// the scheduler.
///
/// # Examples
///
/// ```
/// use tallyx::{SharedCounter, Worker};
///
/// let counter = SharedCounter::new();
/// let performed = Worker::new(1000).run(&counter);
///
/// assert_eq!(performed, 1000);
/// assert_eq!(counter.read(), 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Worker {
    iterations: usize,
}

impl Worker {
    /// Create a worker that performs `iterations` increments.
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    /// Number of increments this worker performs.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Perform every increment, returning how many were performed.
    pub fn run(&self, counter: &SharedCounter) -> usize {
        for _ in 0..self.iterations {
            counter.increment();
        }

        #[cfg(feature = "tracing")]
        trace!(increments = self.iterations, "worker finished");

        self.iterations
    }
}
