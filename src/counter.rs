//! The shared counter and its memory-ordering contract.
//!
//! [`SharedCounter`] is the only piece of mutable state shared between the
//! worker and the observer. Every access goes through a single atomic
//! location, so there is never a data race, an update is never lost, and a
//! read never observes a torn value.

use std::sync::atomic::{AtomicU64, Ordering};

/// Which atomic orderings a [`SharedCounter`] uses.
///
/// Atomicity holds under every variant: increments form a single total order
/// and each read returns some value from that order. The variants only differ
/// in what *other* memory a read synchronizes with.
///
/// | variant                  | increment | read    |
/// |--------------------------|-----------|---------|
/// | `Relaxed`                | Relaxed   | Relaxed |
/// | `AcquireRelease`         | Release   | Acquire |
/// | `SequentiallyConsistent` | SeqCst    | SeqCst  |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MemoryOrdering {
    /// Atomicity only. Enough for counting.
    Relaxed,
    /// Increments publish with `Release`, reads load with `Acquire`.
    #[default]
    AcquireRelease,
    /// A single total order over every access.
    SequentiallyConsistent,
}

impl MemoryOrdering {
    /// Ordering used by [`SharedCounter::increment`].
    pub fn increment_ordering(self) -> Ordering {
        match self {
            MemoryOrdering::Relaxed => Ordering::Relaxed,
            MemoryOrdering::AcquireRelease => Ordering::Release,
            MemoryOrdering::SequentiallyConsistent => Ordering::SeqCst,
        }
    }

    /// Ordering used by [`SharedCounter::read`].
    pub fn read_ordering(self) -> Ordering {
        match self {
            MemoryOrdering::Relaxed => Ordering::Relaxed,
            MemoryOrdering::AcquireRelease => Ordering::Acquire,
            MemoryOrdering::SequentiallyConsistent => Ordering::SeqCst,
        }
    }
}

/// An atomically updated, monotonically non-decreasing `u64`.
///
/// Share it between tasks with an [`Arc`](std::sync::Arc). Both
/// [`increment`](Self::increment) and [`read`](Self::read) take `&self` and
/// may be called concurrently from any number of threads.
///
/// # Overflow
///
/// The value is 64 bits wide, so it cannot overflow within any realistic
/// number of increments. Should it ever reach `u64::MAX`, the next increment
/// wraps around to 0.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use tallyx::SharedCounter;
///
/// let counter = Arc::new(SharedCounter::new());
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let counter = Arc::clone(&counter);
///         thread::spawn(move || {
///             for _ in 0..250 {
///                 counter.increment();
///             }
///         })
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(counter.read(), 1000);
/// ```
#[derive(Debug, Default)]
pub struct SharedCounter {
    value: AtomicU64,
    ordering: MemoryOrdering,
}

impl SharedCounter {
    /// Create a counter at 0 using [`MemoryOrdering::AcquireRelease`].
    pub fn new() -> Self {
        Self::with_ordering(MemoryOrdering::default())
    }

    /// Create a counter at 0 using the given ordering contract.
    pub fn with_ordering(ordering: MemoryOrdering) -> Self {
        Self {
            value: AtomicU64::new(0),
            ordering,
        }
    }

    /// Atomically add 1.
    #[inline]
    pub fn increment(&self) {
        // fetch_add wraps on overflow
        self.value.fetch_add(1, self.ordering.increment_ordering());
    }

    /// Atomically load the current value.
    #[inline]
    pub fn read(&self) -> u64 {
        self.value.load(self.ordering.read_ordering())
    }

    /// The ordering contract this counter was created with.
    pub fn ordering(&self) -> MemoryOrdering {
        self.ordering
    }

    /// Consume the counter and return its final value.
    ///
    /// Needs no ordering at all: owning the counter means every other handle
    /// is gone.
    pub fn into_inner(self) -> u64 {
        self.value.into_inner()
    }
}
