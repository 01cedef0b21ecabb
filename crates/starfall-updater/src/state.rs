//! Pipeline state and the single-flight guard.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Observable state of the update pipeline.
///
/// At most one pipeline execution is active at a time; `Succeeded` and
/// `Failed` are terminal for a run but a new run may start from either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// No pipeline has run yet, or the last run finished and was observed.
    #[default]
    Idle,
    /// Comparing the local marker against the remote token.
    CheckingVersion,
    /// Streaming the archive to the staging file.
    Downloading,
    /// Extracting archive entries.
    Extracting,
    /// Persisting the version marker and removing the staged archive.
    Finalizing,
    /// Last run completed successfully.
    Succeeded,
    /// Last run aborted with an error.
    Failed,
}

impl PipelineState {
    /// Whether a pipeline execution is currently in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::CheckingVersion | Self::Downloading | Self::Extracting | Self::Finalizing
        )
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::CheckingVersion => "checking version",
            Self::Downloading => "downloading",
            Self::Extracting => "extracting",
            Self::Finalizing => "finalizing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// Shared pipeline state handle.
#[derive(Debug, Clone, Default)]
pub(crate) struct StateCell {
    inner: Arc<Mutex<PipelineState>>,
}

impl StateCell {
    pub(crate) fn get(&self) -> PipelineState {
        *self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn set(&self, state: PipelineState) {
        *self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = state;
    }

    /// Try to start a pipeline run.
    ///
    /// Returns `None` if a run is already in flight; otherwise transitions to
    /// `initial` and returns a guard that must be completed or dropped.
    pub(crate) fn try_begin(&self, initial: PipelineState) -> Option<FlightGuard> {
        let mut slot = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if slot.is_busy() {
            return None;
        }
        *slot = initial;
        drop(slot);
        Some(FlightGuard {
            cell: self.clone(),
            finished: false,
        })
    }
}

/// Guard for one in-flight pipeline run.
///
/// Dropping the guard without calling [`FlightGuard::finish`] marks the run
/// `Failed`, so early returns and panics always clear the single-flight flag.
pub(crate) struct FlightGuard {
    cell: StateCell,
    finished: bool,
}

impl FlightGuard {
    pub(crate) fn advance(&self, state: PipelineState) {
        self.cell.set(state);
    }

    pub(crate) fn finish(mut self, state: PipelineState) {
        self.cell.set(state);
        self.finished = true;
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.cell.set(PipelineState::Failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_states() {
        assert!(!PipelineState::Idle.is_busy());
        assert!(PipelineState::CheckingVersion.is_busy());
        assert!(PipelineState::Downloading.is_busy());
        assert!(PipelineState::Extracting.is_busy());
        assert!(PipelineState::Finalizing.is_busy());
        assert!(!PipelineState::Succeeded.is_busy());
        assert!(!PipelineState::Failed.is_busy());
    }

    #[test]
    fn test_second_begin_rejected_while_in_flight() {
        let cell = StateCell::default();
        let guard = cell.try_begin(PipelineState::Downloading).unwrap();
        assert!(cell.try_begin(PipelineState::Downloading).is_none());
        guard.finish(PipelineState::Succeeded);
        assert_eq!(cell.get(), PipelineState::Succeeded);
        assert!(cell.try_begin(PipelineState::Downloading).is_some());
    }

    #[test]
    fn test_dropped_guard_marks_failed() {
        let cell = StateCell::default();
        let guard = cell.try_begin(PipelineState::Extracting).unwrap();
        drop(guard);
        assert_eq!(cell.get(), PipelineState::Failed);
        assert!(!cell.get().is_busy());
    }
}
