//! Job trait definition.

use async_trait::async_trait;

use super::JobContext;
use crate::error::JobError;

/// Core trait for jobs.
///
/// Jobs are the units of work a scheduler executes when a trigger fires.
/// Implementations must tolerate concurrent `execute` calls; any per-run
/// state they expose has to be internally synchronized.
#[async_trait]
pub trait Job: Send + Sync {
    /// Execute the job under the given context.
    ///
    /// The context carries cooperative cancellation; implementations that
    /// run for a long time are expected to honor it.
    async fn execute(&self, ctx: JobContext) -> Result<(), JobError>;

    /// Returns a human-readable description of the job.
    fn description(&self) -> String;
}
