//! The reading task and the sequence of values it records.
//!
//! # What an observer may see
//!
//! Nothing links the worker's progress to the observer's progress. An
//! [`ObservedSequence`] therefore carries **no** guarantee about which
//! intermediate values appear: it may contain duplicates, skip values, be all
//! zeros, or reach the final value on its first read. The only guarantee is
//! that every entry is a value the counter actually held, so it lies between
//! 0 and the number of increments performed.
//!
//! In practice a single observer of one atomic location sees a non-decreasing
//! sequence, and [`ObservedSequence::is_non_decreasing`] reports whether that
//! happened, but callers should not rely on it.

use std::collections::BTreeSet;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::counter::SharedCounter;

/// Reads a [`SharedCounter`] a fixed number of times.
///
/// # Examples
///
/// ```
/// use tallyx::{Observer, SharedCounter};
///
/// let counter = SharedCounter::new();
/// counter.increment();
///
/// let observed = Observer::new(3).run(&counter);
/// assert_eq!(observed.as_slice(), &[1, 1, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observer {
    iterations: usize,
}

impl Observer {
    /// Create an observer that performs `iterations` reads.
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    /// Number of reads this observer performs.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Perform every read, recording each value in order.
    pub fn run(&self, counter: &SharedCounter) -> ObservedSequence {
        // Allocate up front so the read loop never allocates
        let mut values = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            values.push(counter.read());
        }

        #[cfg(feature = "tracing")]
        trace!(
            reads = values.len(),
            last = values.last().copied(),
            "observer finished"
        );

        ObservedSequence { values }
    }
}

/// The values an [`Observer`] read, one entry per read, in read order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedSequence {
    values: Vec<u64>,
}

impl ObservedSequence {
    /// Number of recorded reads.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.values.iter()
    }

    /// Take the recorded values.
    pub fn into_inner(self) -> Vec<u64> {
        self.values
    }

    /// The value seen by the first read.
    pub fn first(&self) -> Option<u64> {
        self.values.first().copied()
    }

    /// The value seen by the last read.
    pub fn last(&self) -> Option<u64> {
        self.values.last().copied()
    }

    /// The largest value seen.
    pub fn max(&self) -> Option<u64> {
        self.values.iter().copied().max()
    }

    /// Whether every read saw at least the value of the read before it.
    ///
    /// This is a report about one particular run. It is not a property the
    /// crate guarantees; see the [module docs](crate::observer).
    pub fn is_non_decreasing(&self) -> bool {
        self.values.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// The distinct values seen, in ascending order.
    pub fn distinct_values(&self) -> BTreeSet<u64> {
        self.values.iter().copied().collect()
    }

    /// Whether every entry lies in `0..=bound`.
    pub fn all_within(&self, bound: u64) -> bool {
        self.values.iter().all(|&value| value <= bound)
    }
}

impl From<Vec<u64>> for ObservedSequence {
    fn from(values: Vec<u64>) -> Self {
        Self { values }
    }
}

impl IntoIterator for ObservedSequence {
    type Item = u64;
    type IntoIter = std::vec::IntoIter<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObservedSequence {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
