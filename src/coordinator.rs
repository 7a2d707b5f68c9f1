//! Coordinator for one worker/observer run.
//!
//! Spawns a [`Worker`] and an [`Observer`] over a fresh [`SharedCounter`],
//! waits for both, and reports what happened.

use std::sync::Arc;

use futures::future::FutureExt;

#[cfg(feature = "tracing")]
use tracing::{debug, error, info};

use crate::counter::{MemoryOrdering, SharedCounter};
use crate::error::CounterResult;
use crate::gate::start_gate;
use crate::observer::{ObservedSequence, Observer};
use crate::spawner::{Spawner, ThreadSpawner};
use crate::types::TaskKind;
use crate::worker::Worker;

/// Iteration count used when none is configured.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Settings for a [`Coordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Increments performed by the worker and reads performed by the observer.
    pub iterations: usize,
    /// Ordering contract of the counter created for each run.
    pub ordering: MemoryOrdering,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            ordering: MemoryOrdering::default(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Counter value after both tasks joined. Always equals the configured
    /// iteration count.
    pub final_value: u64,
    /// Every value the observer read, in read order.
    pub observed: ObservedSequence,
}

impl RunReport {
    /// Split into `(final_value, observed)`.
    pub fn into_parts(self) -> (u64, ObservedSequence) {
        (self.final_value, self.observed)
    }
}

/// Runs one worker against one observer over a shared counter.
///
/// # Workflow
///
/// 1. Create a [`SharedCounter`] at 0
/// 2. Spawn the worker, then the observer, through the given [`Spawner`]
/// 3. Release both tasks at once, then wait for both to finish
/// 4. Return the final counter value and the observed sequence
///
/// Both tasks wait on a start gate until every spawn has succeeded. If a
/// spawn fails, the run stops with [`CounterError::SpawnFailure`] and the
/// already-spawned task exits without touching the counter.
///
/// Every call to [`run`](Self::run) uses a new counter, so runs are
/// independent and can be repeated.
///
/// # Examples
///
/// ```
/// use futures::executor::{block_on, ThreadPool};
/// use tallyx::Coordinator;
///
/// let pool = ThreadPool::new().unwrap();
/// let coordinator = Coordinator::new().with_iterations(500);
///
/// let report = block_on(coordinator.run(&pool)).unwrap();
///
/// assert_eq!(report.final_value, 500);
/// assert_eq!(report.observed.len(), 500);
/// assert!(report.observed.all_within(500));
/// ```
///
/// [`CounterError::SpawnFailure`]: crate::CounterError::SpawnFailure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coordinator {
    config: CoordinatorConfig,
}

impl Coordinator {
    /// A coordinator with [`DEFAULT_ITERATIONS`] and the default ordering.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: CoordinatorConfig) -> Self {
        Self { config }
    }

    /// Set how many increments and reads each run performs.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Set the ordering contract of the counter created for each run.
    pub fn with_ordering(mut self, ordering: MemoryOrdering) -> Self {
        self.config.ordering = ordering;
        self
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Run the worker and the observer to completion using `spawner`.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::SpawnFailure`](crate::CounterError::SpawnFailure)
    /// if either task cannot be spawned. Nothing is retried.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, spawner), fields(iterations = self.config.iterations))
    )]
    pub async fn run<S>(&self, spawner: &S) -> CounterResult<RunReport>
    where
        S: Spawner,
    {
        let counter = Arc::new(SharedCounter::with_ordering(self.config.ordering));
        self.run_with_counter(counter, spawner).await
    }

    /// Run on dedicated OS threads, blocking the caller until both finish.
    pub fn run_blocking(&self) -> CounterResult<RunReport> {
        futures::executor::block_on(self.run(&ThreadSpawner::new()))
    }

    pub(crate) async fn run_with_counter<S>(
        &self,
        counter: Arc<SharedCounter>,
        spawner: &S,
    ) -> CounterResult<RunReport>
    where
        S: Spawner,
    {
        #[cfg(feature = "tracing")]
        info!(ordering = ?self.config.ordering, "starting run");

        let iterations = self.config.iterations;
        let (opener, gate) = start_gate();

        let worker_task = {
            let counter = Arc::clone(&counter);
            let gate = gate.clone();
            let worker = Worker::new(iterations);
            async move {
                if !gate.wait().await {
                    return 0;
                }
                worker.run(&counter)
            }
            .boxed()
        };

        let observer_task = {
            let counter = Arc::clone(&counter);
            let observer = Observer::new(iterations);
            async move {
                if !gate.wait().await {
                    return ObservedSequence::default();
                }
                observer.run(&counter)
            }
            .boxed()
        };

        // Dropping `opener` on either early return cancels the spawned task
        let worker = match spawner.spawn_task(TaskKind::Worker, worker_task) {
            Ok(handle) => handle,
            Err(err) => {
                #[cfg(feature = "tracing")]
                error!(error = %err, "worker spawn failed");
                return Err(err);
            }
        };
        let observer = match spawner.spawn_task(TaskKind::Observer, observer_task) {
            Ok(handle) => handle,
            Err(err) => {
                #[cfg(feature = "tracing")]
                error!(error = %err, "observer spawn failed");
                return Err(err);
            }
        };

        #[cfg(feature = "tracing")]
        debug!("both tasks spawned, opening start gate");

        opener.open();
        let (increments, observed) = futures::join!(worker, observer);

        let final_value = counter.read();

        #[cfg(feature = "tracing")]
        info!(
            final_value,
            increments,
            reads = observed.len(),
            non_decreasing = observed.is_non_decreasing(),
            "run completed"
        );
        debug_assert_eq!(increments, iterations);

        Ok(RunReport {
            final_value,
            observed,
        })
    }
}
