//! Runtime tests module
//!
//! The same properties must hold whichever substrate runs the two tasks.

mod compatibility;

use futures::future::{BoxFuture, FutureExt};
use tallyx::{Coordinator, CounterResult, MemoryOrdering, RunReport, Spawner, TaskKind};
use test_case::test_case;

use crate::common::{assert_report_invariants, InlineSpawner, SmolSpawner, TokioSpawner, N};

trait RuntimeTest {
    fn run_tallyx_test(&self, coordinator: &Coordinator) -> CounterResult<RunReport>;
}

struct SmolRuntimeTest;

impl RuntimeTest for SmolRuntimeTest {
    fn run_tallyx_test(&self, coordinator: &Coordinator) -> CounterResult<RunReport> {
        smol::block_on(coordinator.run(&SmolSpawner))
    }
}

struct FuturesExecutorRuntimeTest;

impl RuntimeTest for FuturesExecutorRuntimeTest {
    fn run_tallyx_test(&self, coordinator: &Coordinator) -> CounterResult<RunReport> {
        let pool = futures_executor::ThreadPool::new().unwrap();
        futures_executor::block_on(coordinator.run(&pool))
    }
}

struct PollsterRuntimeTest;

impl RuntimeTest for PollsterRuntimeTest {
    fn run_tallyx_test(&self, coordinator: &Coordinator) -> CounterResult<RunReport> {
        // Both tasks share the calling thread
        pollster::block_on(coordinator.run(&InlineSpawner))
    }
}

static ASYNC_EXECUTOR: async_executor::Executor = async_executor::Executor::new();

struct AsyncExecutorSpawner;

impl Spawner for AsyncExecutorSpawner {
    fn spawn_task<T: Send + 'static>(
        &self,
        _kind: TaskKind,
        future: BoxFuture<'static, T>,
    ) -> CounterResult<BoxFuture<'static, T>> {
        Ok(ASYNC_EXECUTOR.spawn(future).boxed())
    }
}

struct AsyncExecutorRuntimeTest;

impl RuntimeTest for AsyncExecutorRuntimeTest {
    fn run_tallyx_test(&self, coordinator: &Coordinator) -> CounterResult<RunReport> {
        smol::future::block_on(ASYNC_EXECUTOR.run(coordinator.run(&AsyncExecutorSpawner)))
    }
}

struct TokioRuntimeTest;

impl RuntimeTest for TokioRuntimeTest {
    fn run_tallyx_test(&self, coordinator: &Coordinator) -> CounterResult<RunReport> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .unwrap();
        runtime.block_on(coordinator.run(&TokioSpawner))
    }
}

struct ThreadRuntimeTest;

impl RuntimeTest for ThreadRuntimeTest {
    fn run_tallyx_test(&self, coordinator: &Coordinator) -> CounterResult<RunReport> {
        coordinator.run_blocking()
    }
}

#[test_case(SmolRuntimeTest)]
#[test_case(FuturesExecutorRuntimeTest)]
#[test_case(PollsterRuntimeTest)]
#[test_case(AsyncExecutorRuntimeTest)]
#[test_case(TokioRuntimeTest)]
#[test_case(ThreadRuntimeTest)]
fn test_default_run(runner: impl RuntimeTest) {
    let report = runner.run_tallyx_test(&Coordinator::new()).unwrap();
    assert_report_invariants(&report, N);
}

#[test_case(SmolRuntimeTest)]
#[test_case(FuturesExecutorRuntimeTest)]
#[test_case(PollsterRuntimeTest)]
#[test_case(AsyncExecutorRuntimeTest)]
#[test_case(TokioRuntimeTest)]
#[test_case(ThreadRuntimeTest)]
fn test_single_iteration(runner: impl RuntimeTest) {
    let report = runner
        .run_tallyx_test(&Coordinator::new().with_iterations(1))
        .unwrap();

    assert_eq!(report.final_value, 1);
    assert!(matches!(report.observed.as_slice(), [0] | [1]));
}

#[test_case(SmolRuntimeTest)]
#[test_case(FuturesExecutorRuntimeTest)]
#[test_case(PollsterRuntimeTest)]
#[test_case(AsyncExecutorRuntimeTest)]
#[test_case(TokioRuntimeTest)]
#[test_case(ThreadRuntimeTest)]
fn test_repeated_runs(runner: impl RuntimeTest) {
    let coordinator = Coordinator::new().with_ordering(MemoryOrdering::Relaxed);

    for _ in 0..10 {
        let report = runner.run_tallyx_test(&coordinator).unwrap();
        assert_report_invariants(&report, N);
    }
}
