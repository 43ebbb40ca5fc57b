//! # Carillon Shell Job Extension
//!
//! Shell-command implementation of the [`carillon_protocols::Job`] contract.
//! A [`ShellJob`] runs a command line through the system shell under a
//! deadline, captures stdout/stderr, tracks a four-state run status and
//! publishes results through a concurrently readable snapshot plus an
//! optional completion callback.

pub mod job;
pub mod result;
mod shell;

pub use job::{ShellJob, ShellJobCallback, DEFAULT_TIMEOUT};
pub use result::ShellJobResult;
