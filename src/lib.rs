//! # Carillon
//!
//! Execution core of a task-scheduling library. Carillon defines the two
//! contracts a scheduler loop is built on and ships a production
//! implementation of each:
//!
//! - **[`Trigger`]**: computes the next fire time strictly after a previous
//!   one. Implemented by [`CronTrigger`] for five-field cron expressions and
//!   `@` descriptors, evaluated in a configurable time zone.
//! - **[`Job`]**: an async unit of work run under a [`JobContext`].
//!   Implemented by [`ShellJob`], which supervises a shell command with
//!   output capture, a deadline, and an atomically committed result
//!   snapshot.
//!
//! ## Computing fire times
//!
//! Fire times chain: feeding one back in yields the next occurrence.
//!
//! ```
//! use carillon::{CronTrigger, Trigger};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let trigger = CronTrigger::new("*/15 * * * *")?;
//!
//! // Base: 2024-01-01T12:00:00Z. Each fire is strictly after the previous.
//! let first = trigger.next_fire_time(1_704_110_400_000)?;
//! let second = trigger.next_fire_time(first)?;
//! assert_eq!(second - first, 15 * 60 * 1000);
//! # Ok(())
//! # }
//! ```
//!
//! ## Running jobs
//!
//! A job commits its result before `execute` returns, so the snapshot
//! accessors are consistent as soon as the call resolves. Callers that hold
//! the job can read the outcome even when `execute` returns an error.
//!
//! ```no_run
//! use carillon::{Job, JobContext, ShellJob, Status};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let job = ShellJob::new("echo hello")?.with_timeout(Duration::from_secs(5));
//! job.execute(JobContext::new()).await?;
//!
//! assert_eq!(job.job_status(), Status::Ok);
//! assert_eq!(job.stdout(), "hello\n");
//! # Ok(())
//! # }
//! ```

pub use carillon_protocols::{
    millis_to_utc, now_millis, Job, JobContext, JobError, Status, Trigger, TriggerError, SEP,
};

pub use carillon_jobs_shell::{ShellJob, ShellJobCallback, ShellJobResult, DEFAULT_TIMEOUT};
pub use carillon_triggers_cron::CronTrigger;
