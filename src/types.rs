//! Core type definitions shared by the tasks and the coordinator.

use std::fmt;

/// Identifies one of the two tasks a [`crate::Coordinator`] spawns.
///
/// Used to label spawn failures, thread names and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    /// The producer that increments the counter.
    Worker,
    /// The reader that records every value it sees.
    Observer,
}

impl TaskKind {
    /// Lowercase name, as used in thread names.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Worker => "worker",
            TaskKind::Observer => "observer",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
