//! Job execution status.

use serde::{Deserialize, Serialize};

/// Outcome of a job's most recent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The job has not finished a run yet.
    NotApplicable,
    /// The last run completed cleanly.
    Ok,
    /// The last run failed to start, exited nonzero or died abnormally.
    Failure,
    /// The last run was terminated because its deadline expired.
    Timeout,
}

impl Default for Status {
    fn default() -> Self {
        Status::NotApplicable
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::NotApplicable => "NA",
            Status::Ok => "OK",
            Status::Failure => "FAILURE",
            Status::Timeout => "TIMEOUT",
        };
        write!(f, "{}", s)
    }
}
