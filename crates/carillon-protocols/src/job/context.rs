//! Job execution context.

use tokio_util::sync::CancellationToken;

/// Context for one job execution.
///
/// Cloning is cheap; clones observe the same cancellation state, so a
/// scheduler can keep one handle and cancel the run it handed out.
#[derive(Debug, Clone)]
pub struct JobContext {
    /// Cooperative cancellation for this execution.
    pub cancellation: CancellationToken,
}

impl JobContext {
    /// Creates a root context that is never cancelled externally.
    pub fn new() -> Self {
        Self {
            cancellation: CancellationToken::new(),
        }
    }

    /// Creates a context driven by an external cancellation token.
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self { cancellation }
    }

    /// Returns true once the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl Default for JobContext {
    fn default() -> Self {
        Self::new()
    }
}
