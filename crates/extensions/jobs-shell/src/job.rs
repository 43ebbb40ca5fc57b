//! Shell command job.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use carillon_protocols::{Job, JobContext, JobError, Status, SEP};

use crate::result::ShellJobResult;
use crate::shell;

/// Timeout applied when a job is built without an explicit one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Window between the graceful and the forced termination signal.
const TERMINATION_GRACE: Duration = Duration::from_millis(100);

/// Callback dispatched after a run has committed its result. It receives
/// the run's context and a handle to the job itself, so the committed state
/// is available through the ordinary accessors.
pub type ShellJobCallback = Arc<dyn Fn(JobContext, ShellJob) + Send + Sync>;

#[derive(Debug, Default)]
struct RunState {
    result: ShellJobResult,
    status: Status,
}

/// Job that runs a command line through the system shell.
///
/// Every execution spawns `<shell> -c <command>` with stdout and stderr
/// captured into memory, bounded by a deadline (the configured timeout or
/// the caller's cancellation, whichever expires first). When the deadline
/// wins, the whole process group is terminated with an escalating
/// SIGTERM/SIGKILL sequence.
///
/// The result of the most recently finished run is committed as one atomic
/// snapshot and can be read at any time, also while another run is in
/// flight. `ShellJob` is cheap to clone; clones are handles onto the same
/// run state, and concurrent executions are allowed (the last one to finish
/// wins the snapshot).
#[derive(Clone)]
pub struct ShellJob {
    command: String,
    timeout: Duration,
    state: Arc<RwLock<RunState>>,
    callback: Option<ShellJobCallback>,
}

impl ShellJob {
    /// Creates a job running the given command line with the default
    /// timeout. Fails when the command is empty.
    pub fn new(command: impl Into<String>) -> Result<Self, JobError> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(JobError::InvalidArgument("command is empty".to_string()));
        }
        Ok(Self {
            command,
            timeout: DEFAULT_TIMEOUT,
            state: Arc::new(RwLock::new(RunState::default())),
            callback: None,
        })
    }

    /// Overrides the default timeout. A zero duration is ignored and keeps
    /// the previous value.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    /// Installs a callback dispatched once after every run, no matter how
    /// the run ended. The callback runs on its own task; a panic inside it
    /// is caught and logged, never propagated.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(JobContext, ShellJob) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// The command line this job runs.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The timeout applied to each run.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Exit code of the most recently finished run.
    pub fn exit_code(&self) -> i32 {
        self.state.read().result.exit_code
    }

    /// Stdout captured by the most recently finished run.
    pub fn stdout(&self) -> String {
        self.state.read().result.stdout.clone()
    }

    /// Stderr captured by the most recently finished run.
    pub fn stderr(&self) -> String {
        self.state.read().result.stderr.clone()
    }

    /// Status of the most recently finished run.
    pub fn job_status(&self) -> Status {
        self.state.read().status
    }

    /// Copy of the full result snapshot.
    pub fn result(&self) -> ShellJobResult {
        self.state.read().result.clone()
    }

    async fn run(&self, shell: &Path, ctx: JobContext) -> Result<(), JobError> {
        let mut command = Command::new(shell);
        command
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // A deadline kill must reach the whole subtree, so the child gets
        // its own process group.
        #[cfg(unix)]
        command.process_group(0);

        debug!(command = %self.command, shell = %shell.display(), "spawning shell command");
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                self.commit(String::new(), String::new(), -1, Status::Failure);
                self.dispatch_callback(&ctx);
                return Err(JobError::ProcessSpawn(err));
            }
        };

        let stdout_task = capture(child.stdout.take());
        let stderr_task = capture(child.stderr.take());

        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        // First-resolves-wins race between process completion and the
        // deadline (configured timeout or caller cancellation).
        let wait_result = tokio::select! {
            result = child.wait() => Some(result),
            _ = &mut deadline => None,
            _ = ctx.cancellation.cancelled() => None,
        };

        let Some(wait_result) = wait_result else {
            terminate(&mut child).await;
            let (stdout, stderr) = drain(stdout_task, stderr_task).await;
            self.commit(stdout, stderr, -1, Status::Timeout);
            self.dispatch_callback(&ctx);
            return Err(JobError::DeadlineExceeded);
        };

        let (stdout, stderr) = drain(stdout_task, stderr_task).await;
        match wait_result {
            Ok(exit) => {
                let exit_code = exit.code().unwrap_or(-1);
                if exit.success() {
                    self.commit(stdout, stderr, exit_code, Status::Ok);
                    self.dispatch_callback(&ctx);
                    Ok(())
                } else {
                    self.commit(stdout, stderr, exit_code, Status::Failure);
                    self.dispatch_callback(&ctx);
                    Err(JobError::ProcessFailed { code: exit_code })
                }
            }
            Err(err) => {
                self.commit(stdout, stderr, -1, Status::Failure);
                self.dispatch_callback(&ctx);
                Err(JobError::ProcessWait(err))
            }
        }
    }

    /// Writes result and status as one atomic unit. Readers holding the
    /// read lock never observe a mix of two runs.
    fn commit(&self, stdout: String, stderr: String, exit_code: i32, status: Status) {
        let mut state = self.state.write();
        state.result = ShellJobResult {
            exit_code,
            stdout,
            stderr,
        };
        state.status = status;
    }

    fn dispatch_callback(&self, ctx: &JobContext) {
        let Some(callback) = self.callback.clone() else {
            return;
        };
        let job = self.clone();
        let ctx = ctx.clone();
        tokio::spawn(async move {
            if let Err(panic) = std::panic::catch_unwind(AssertUnwindSafe(|| callback(ctx, job))) {
                error!(reason = panic_message(&panic), "shell job callback panicked");
            }
        });
    }
}

#[async_trait]
impl Job for ShellJob {
    async fn execute(&self, ctx: JobContext) -> Result<(), JobError> {
        self.run(shell::shell_path(), ctx).await
    }

    fn description(&self) -> String {
        format!("ShellJob{}{}", SEP, self.command)
    }
}

impl fmt::Debug for ShellJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellJob")
            .field("command", &self.command)
            .field("timeout", &self.timeout)
            .field("status", &self.job_status())
            .finish()
    }
}

/// Drains one output pipe into memory on its own task so a filling pipe
/// can never stall the process or the deadline race.
fn capture<R>(stream: Option<R>) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut stream) = stream {
            if let Err(err) = stream.read_to_end(&mut buf).await {
                warn!(error = %err, "failed reading process output");
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

async fn drain(stdout: JoinHandle<String>, stderr: JoinHandle<String>) -> (String, String) {
    (finish_capture(stdout).await, finish_capture(stderr).await)
}

async fn finish_capture(task: JoinHandle<String>) -> String {
    match task.await {
        Ok(output) => output,
        Err(err) => {
            warn!(error = %err, "output capture task failed");
            String::new()
        }
    }
}

/// Escalating termination for the child's process group. A graceful
/// SIGTERM is followed after a fixed grace period by an unconditional
/// SIGKILL, and the call blocks until the direct child's exit is observed.
#[cfg(unix)]
async fn terminate(child: &mut Child) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(raw_pid) = child.id() else {
        // Already exited and reaped.
        return;
    };
    let pid = Pid::from_raw(raw_pid as i32);

    if killpg(pid, Signal::SIGTERM).is_err() {
        // The graceful signal did not go through; skip the grace period.
        let _ = killpg(pid, Signal::SIGKILL);
    } else {
        // The grace period covers the whole group, not just the direct
        // child. Members that trap SIGTERM only go away with the
        // follow-up SIGKILL, so that one is always sent.
        tokio::time::sleep(TERMINATION_GRACE).await;
        if matches!(child.try_wait(), Ok(None)) {
            warn!(pid = raw_pid, "process survived SIGTERM, sending SIGKILL");
        }
        let _ = killpg(pid, Signal::SIGKILL);
    }

    let _ = child.wait().await;
}

#[cfg(not(unix))]
async fn terminate(child: &mut Child) {
    let _ = child.start_kill();
    let _ = child.wait().await;
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
