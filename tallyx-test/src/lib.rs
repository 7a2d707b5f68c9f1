//! Spawner doubles and assertions for internal use in tallyx tests and benchmarks.
//!
//! This crate is not meant for public use and offers no stability guarantees.

#![cfg(not(tarpaulin_include))]

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::{BoxFuture, FutureExt};

use tallyx::{CounterError, CounterResult, RunReport, Spawner, TaskKind};

/// Spawns onto the ambient Tokio runtime. Task panics are resumed on join.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl Spawner for TokioSpawner {
    fn spawn_task<T: Send + 'static>(
        &self,
        _kind: TaskKind,
        future: BoxFuture<'static, T>,
    ) -> CounterResult<BoxFuture<'static, T>> {
        let handle = tokio::spawn(future);
        Ok(async move {
            match handle.await {
                Ok(output) => output,
                Err(err) => std::panic::resume_unwind(err.into_panic()),
            }
        }
        .boxed())
    }
}

/// Spawns onto smol's global executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmolSpawner;

impl Spawner for SmolSpawner {
    fn spawn_task<T: Send + 'static>(
        &self,
        _kind: TaskKind,
        future: BoxFuture<'static, T>,
    ) -> CounterResult<BoxFuture<'static, T>> {
        Ok(smol::spawn(future).boxed())
    }
}

/// Does not spawn at all: the returned handle *is* the task, driven by
/// whoever awaits it. Worker and observer then share the caller's thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineSpawner;

impl Spawner for InlineSpawner {
    fn spawn_task<T: Send + 'static>(
        &self,
        _kind: TaskKind,
        future: BoxFuture<'static, T>,
    ) -> CounterResult<BoxFuture<'static, T>> {
        Ok(future)
    }
}

/// Refuses every spawn of one task kind, delegating the rest.
#[derive(Debug, Clone)]
pub struct FailingSpawner<S> {
    refuse: TaskKind,
    inner: S,
}

impl<S> FailingSpawner<S> {
    pub fn new(refuse: TaskKind, inner: S) -> Self {
        Self { refuse, inner }
    }
}

impl<S: Spawner> Spawner for FailingSpawner<S> {
    fn spawn_task<T: Send + 'static>(
        &self,
        kind: TaskKind,
        future: BoxFuture<'static, T>,
    ) -> CounterResult<BoxFuture<'static, T>> {
        if kind == self.refuse {
            return Err(CounterError::SpawnFailure {
                task: kind,
                reason: "injected failure".to_string(),
            });
        }
        self.inner.spawn_task(kind, future)
    }
}

/// Allows a fixed number of spawns in total, then reports exhaustion.
#[derive(Debug)]
pub struct BudgetSpawner<S> {
    remaining: AtomicUsize,
    spawned: AtomicUsize,
    inner: S,
}

impl<S> BudgetSpawner<S> {
    pub fn new(budget: usize, inner: S) -> Self {
        Self {
            remaining: AtomicUsize::new(budget),
            spawned: AtomicUsize::new(0),
            inner,
        }
    }

    /// Spawns that went through to the inner spawner.
    pub fn spawned(&self) -> usize {
        self.spawned.load(Ordering::SeqCst)
    }

    pub fn refill(&self, budget: usize) {
        self.remaining.store(budget, Ordering::SeqCst);
    }
}

impl<S: Spawner> Spawner for BudgetSpawner<S> {
    fn spawn_task<T: Send + 'static>(
        &self,
        kind: TaskKind,
        future: BoxFuture<'static, T>,
    ) -> CounterResult<BoxFuture<'static, T>> {
        if self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
        {
            return Err(CounterError::SpawnFailure {
                task: kind,
                reason: "spawn budget exhausted".to_string(),
            });
        }
        let handle = self.inner.spawn_task(kind, future)?;
        self.spawned.fetch_add(1, Ordering::SeqCst);
        Ok(handle)
    }
}

/// Check every property a successful run must have for `iterations`.
///
/// Deliberately does not check that the observed values are non-decreasing.
pub fn assert_report_invariants(report: &RunReport, iterations: usize) {
    let bound = iterations as u64;

    assert_eq!(report.final_value, bound, "lost or extra increments");
    assert_eq!(report.observed.len(), iterations, "wrong number of reads");
    for (read, &value) in report.observed.iter().enumerate() {
        assert!(
            value <= bound,
            "read #{} saw {} which exceeds {}",
            read,
            value,
            bound
        );
    }
}
