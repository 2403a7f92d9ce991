//! Progress reporting for pipeline runs.

use serde::Serialize;

/// Lifecycle point of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Started,
    Done,
}

/// Receives `(stage number, total stages, status, detail)` events.
///
/// Called synchronously from the run; implementations should return quickly.
/// Any `Fn(usize, usize, ProgressStatus, &str)` closure is a sink.
pub trait ProgressSink: Send + Sync {
    fn report(&self, step: usize, total: usize, status: ProgressStatus, detail: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize, ProgressStatus, &str) + Send + Sync,
{
    fn report(&self, step: usize, total: usize, status: ProgressStatus, detail: &str) {
        self(step, total, status, detail)
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _step: usize, _total: usize, _status: ProgressStatus, _detail: &str) {}
}
