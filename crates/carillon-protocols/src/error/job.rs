//! Job execution errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to spawn process: {0}")]
    ProcessSpawn(#[source] std::io::Error),

    #[error("Process exited with code {code}")]
    ProcessFailed { code: i32 },

    #[error("Failed while waiting for process: {0}")]
    ProcessWait(#[source] std::io::Error),

    #[error("Deadline exceeded before the job completed")]
    DeadlineExceeded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_job_error_invalid_argument() {
        let err = JobError::InvalidArgument("command is empty".to_string());
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.to_string().contains("command is empty"));
    }

    #[test]
    fn test_job_error_process_spawn_keeps_source() {
        let err = JobError::ProcessSpawn(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert!(err.to_string().contains("Failed to spawn"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_job_error_process_failed() {
        let err = JobError::ProcessFailed { code: 3 };
        assert!(err.to_string().contains("exited with code 3"));
    }

    #[test]
    fn test_job_error_deadline_exceeded() {
        let err = JobError::DeadlineExceeded;
        assert!(err.to_string().contains("Deadline exceeded"));
    }
}
