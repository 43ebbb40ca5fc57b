//! Trigger errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },

    #[error("Schedule exhausted: no occurrence after the base time for '{expression}'")]
    ScheduleExhausted { expression: String },
}
