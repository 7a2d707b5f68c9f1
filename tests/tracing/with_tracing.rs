//! Tests with tracing feature enabled

use tallyx::{Coordinator, MemoryOrdering, TaskKind, ThreadSpawner};
use tracing_subscriber::{fmt, EnvFilter};

use crate::common::{assert_report_invariants, FailingSpawner, TokioSpawner, N};

fn init_subscriber() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tracing_with_subscriber() {
    init_subscriber();

    let report = Coordinator::new().run(&TokioSpawner).await.unwrap();

    assert_report_invariants(&report, N);
}

#[test]
fn test_tracing_on_os_threads() {
    init_subscriber();

    let spawner = ThreadSpawner::new().with_name_prefix("traced");
    let coordinator = Coordinator::new().with_ordering(MemoryOrdering::SequentiallyConsistent);
    let report = futures::executor::block_on(coordinator.run(&spawner)).unwrap();

    assert_report_invariants(&report, N);
}

#[tokio::test]
async fn test_tracing_spawn_failure() {
    init_subscriber();

    let spawner = FailingSpawner::new(TaskKind::Worker, TokioSpawner);
    assert!(Coordinator::new().run(&spawner).await.is_err());
}
