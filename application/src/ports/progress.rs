//! Progress notification port
//!
//! Defines the interface for reporting progress during an evaluation run.

/// Callback for progress updates during an evaluation run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain lines, nothing).
pub trait EvaluationProgress: Send + Sync {
    /// Called once before the first item, with the number of items to run
    fn on_evaluation_start(&self, total: usize);

    /// Called when an item produced a verdict
    fn on_item_complete(&self, id: &str, correct: bool);

    /// Called when an item was skipped because a strategy call failed
    fn on_item_failed(&self, id: &str, error: &str);

    /// Called once after the last item
    fn on_evaluation_complete(&self, succeeded: usize, failed: usize);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl EvaluationProgress for NoProgress {
    fn on_evaluation_start(&self, _total: usize) {}
    fn on_item_complete(&self, _id: &str, _correct: bool) {}
    fn on_item_failed(&self, _id: &str, _error: &str) {}
    fn on_evaluation_complete(&self, _succeeded: usize, _failed: usize) {}
}
