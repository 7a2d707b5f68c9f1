//! Runtime-agnostic task spawning.
//!
//! A [`Spawner`] hands a future to some execution substrate and returns a
//! join handle for it. Any [`futures::task::Spawn`] implementor is a spawner
//! already (for example `futures::executor::ThreadPool`). [`ThreadSpawner`]
//! runs each task on its own OS thread.
//!
//! Adapting another runtime takes a few lines. For Tokio:
//!
//! ```no_run
//! use futures::future::{BoxFuture, FutureExt};
//! use tallyx::{CounterResult, Spawner, TaskKind};
//!
//! struct TokioSpawner;
//!
//! impl Spawner for TokioSpawner {
//!     fn spawn_task<T: Send + 'static>(
//!         &self,
//!         _kind: TaskKind,
//!         future: BoxFuture<'static, T>,
//!     ) -> CounterResult<BoxFuture<'static, T>> {
//!         let handle = tokio::spawn(future);
//!         Ok(async move { handle.await.unwrap() }.boxed())
//!     }
//! }
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::{BoxFuture, FutureExt};
use futures::task::{Spawn, SpawnExt};

#[cfg(feature = "tracing")]
use tracing::{debug, error};

use crate::error::{CounterError, CounterResult};
use crate::types::TaskKind;

/// Starts a future on an execution substrate.
pub trait Spawner {
    /// Start `future` and return a handle that resolves to its output.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::SpawnFailure`] naming `kind` if the substrate
    /// cannot start another task.
    fn spawn_task<T: Send + 'static>(
        &self,
        kind: TaskKind,
        future: BoxFuture<'static, T>,
    ) -> CounterResult<BoxFuture<'static, T>>;
}

impl<Sp> Spawner for Sp
where
    Sp: Spawn,
{
    fn spawn_task<T: Send + 'static>(
        &self,
        kind: TaskKind,
        future: BoxFuture<'static, T>,
    ) -> CounterResult<BoxFuture<'static, T>> {
        self.spawn_with_handle(future)
            .map(FutureExt::boxed)
            .map_err(|err| CounterError::SpawnFailure {
                task: kind,
                reason: err.to_string(),
            })
    }
}

/// Runs every task on a dedicated, named OS thread.
///
/// Each thread drives its future to completion with
/// [`futures::executor::block_on`]. A panic inside a task is caught on its
/// thread and resumed when the join handle is awaited.
///
/// # Examples
///
/// ```
/// use futures::executor::block_on;
/// use tallyx::{Coordinator, ThreadSpawner};
///
/// let spawner = ThreadSpawner::new().with_name_prefix("demo");
/// let report = block_on(Coordinator::new().run(&spawner)).unwrap();
/// assert_eq!(report.final_value, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSpawner {
    name_prefix: String,
    stack_size: Option<usize>,
}

impl Default for ThreadSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadSpawner {
    /// Threads are named `tallyx-worker` and `tallyx-observer`, with the
    /// platform's default stack size.
    pub fn new() -> Self {
        Self {
            name_prefix: "tallyx".to_string(),
            stack_size: None,
        }
    }

    /// Prefix for thread names; the task kind is appended after a `-`.
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Stack size in bytes for each spawned thread.
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Name given to the thread running `kind`.
    pub fn thread_name(&self, kind: TaskKind) -> String {
        format!("{}-{}", self.name_prefix, kind)
    }
}

impl Spawner for ThreadSpawner {
    fn spawn_task<T: Send + 'static>(
        &self,
        kind: TaskKind,
        future: BoxFuture<'static, T>,
    ) -> CounterResult<BoxFuture<'static, T>> {
        let (tx, rx) = oneshot::channel();

        let mut builder = thread::Builder::new().name(self.thread_name(kind));
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }

        builder
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| block_on(future)));
                // The join handle may have been dropped
                let _ = tx.send(outcome);
            })
            .map_err(|err| {
                #[cfg(feature = "tracing")]
                error!(task = %kind, error = %err, "failed to start thread");

                CounterError::SpawnFailure {
                    task: kind,
                    reason: err.to_string(),
                }
            })?;

        #[cfg(feature = "tracing")]
        debug!(task = %kind, thread = %self.thread_name(kind), "thread started");

        Ok(async move {
            match rx.await {
                Ok(Ok(output)) => output,
                Ok(Err(payload)) => panic::resume_unwind(payload),
                Err(oneshot::Canceled) => {
                    panic!("{} thread exited without reporting a result", kind)
                }
            }
        }
        .boxed())
    }
}
