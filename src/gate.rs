//! One-shot start gate shared by the spawned tasks.
//!
//! Tasks are spawned first and wait on the gate; the coordinator opens it only
//! once every spawn succeeded. If a spawn fails, the opener is dropped instead
//! and every waiting task learns it must not run.

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};

/// Opens the gate for every [`StartGate`] cloned from the same pair.
pub(crate) struct GateOpener {
    tx: oneshot::Sender<()>,
}

impl GateOpener {
    pub(crate) fn open(self) {
        // Receivers only disappear when every task has already given up
        let _ = self.tx.send(());
    }
}

/// Waiting side of the gate. Cheap to clone.
#[derive(Clone)]
pub(crate) struct StartGate {
    signal: Shared<oneshot::Receiver<()>>,
}

impl StartGate {
    /// Resolve once the gate is decided: `true` if opened, `false` if the
    /// opener was dropped.
    pub(crate) async fn wait(self) -> bool {
        self.signal.await.is_ok()
    }
}

pub(crate) fn start_gate() -> (GateOpener, StartGate) {
    let (tx, rx) = oneshot::channel();
    (GateOpener { tx }, StartGate { signal: rx.shared() })
}
