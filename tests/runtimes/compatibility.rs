//! Runtime integration tests - verify tallyx works inside a running Tokio runtime

use crate::common::{assert_report_invariants, TokioSpawner, N};
use tallyx::{Coordinator, CounterResult};

#[tokio::test]
async fn runtime_integration_tokio_current_thread() -> CounterResult<()> {
    // Both tasks interleave on one thread at await points only
    let report = Coordinator::new().run(&TokioSpawner).await?;

    assert_report_invariants(&report, N);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn runtime_integration_tokio_multi_thread() -> CounterResult<()> {
    let report = Coordinator::new().run(&TokioSpawner).await?;

    assert_report_invariants(&report, N);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn runtime_integration_tokio_with_futures_pool() -> CounterResult<()> {
    // The spawner need not belong to the runtime awaiting the run
    let pool = futures::executor::ThreadPool::new().unwrap();
    let report = Coordinator::new().run(&pool).await?;

    assert_report_invariants(&report, N);
    Ok(())
}
