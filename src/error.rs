//! Error types for counter runs.
//!
//! A run has exactly one fatal condition: the execution substrate refused to
//! start one of the two tasks.

use crate::types::TaskKind;

/// Errors that can occur while starting a run
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CounterError {
    /// The spawner could not start a task
    SpawnFailure { task: TaskKind, reason: String },
}

impl std::fmt::Display for CounterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterError::SpawnFailure { task, reason } => {
                write!(
                    f,
                    "Failed to spawn the {} task: {}\n\
                     \n\
                     The run was abandoned before either task touched the counter.",
                    task, reason
                )
            }
        }
    }
}

impl std::error::Error for CounterError {}

/// Result type for counter runs
#[cfg(not(tarpaulin_include))]
pub type CounterResult<T> = Result<T, CounterError>;
