//! Shell run result snapshot.

use serde::{Deserialize, Serialize};

/// Captured outcome of the most recently finished shell run.
///
/// The default value (exit code 0, empty output) is what readers observe
/// before a job has finished its first run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellJobResult {
    /// Exit code of the process; `-1` when the process never started, died
    /// on a signal or was killed at the deadline.
    pub exit_code: i32,
    /// Everything the process wrote to stdout, lossily decoded as UTF-8.
    pub stdout: String,
    /// Everything the process wrote to stderr, lossily decoded as UTF-8.
    pub stderr: String,
}
