//! External command execution with retry, backoff and failure classification.
//!
//! All yt-dlp/ffmpeg/ffprobe invocations go through [`CommandRunner`], which
//! wraps a low-level [`Executor`] with:
//! - a hard per-command timeout (the child is killed on expiry)
//! - exponential backoff retries (`2^attempt` seconds, attempt from 0)
//! - fatal-marker classification that stops retries immediately
//!
//! The [`Executor`] seam exists so acquisition and analysis logic can be
//! tested against scripted outputs without spawning processes.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Error text that marks a command failure as unrecoverable. Retrying a
/// private or removed video only burns the retry budget.
pub const FATAL_MARKERS: &[&str] = &["Video unavailable", "Private video"];

/// Default per-command timeout in seconds.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 300;

/// Classification of a single command run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Exit code zero.
    Success,
    /// Timeout or non-zero exit without a fatal marker.
    RetryableFailure,
    /// Stderr matched a fatal marker; stop retrying.
    FatalFailure,
}

/// Raw result of one command execution.
#[derive(Debug, Clone, Default)]
pub struct RawOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RawOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Captured output of a successful command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Classify a finished run against the fatal-marker list.
pub fn classify(raw: &RawOutput) -> RunStatus {
    if raw.success() {
        return RunStatus::Success;
    }
    if FATAL_MARKERS.iter().any(|m| raw.stderr.contains(m)) {
        return RunStatus::FatalFailure;
    }
    RunStatus::RetryableFailure
}

/// Low-level command execution seam.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute `argv` (program plus arguments), returning captured output.
    ///
    /// Implementations return `MediaError::Timeout` when the command exceeds
    /// `timeout`; partial output files on disk are left for the caller.
    async fn execute(&self, argv: &[String], timeout: Duration) -> MediaResult<RawOutput>;
}

/// Executor that spawns real processes via tokio.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

#[async_trait]
impl Executor for ProcessExecutor {
    async fn execute(&self, argv: &[String], timeout: Duration) -> MediaResult<RawOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| MediaError::command_failed("empty argv", None, None))?;

        let child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                // kill_on_drop reaps the child once the future is dropped
                warn!(program = %program, timeout_secs = timeout.as_secs(), "command timed out");
                return Err(MediaError::Timeout(timeout.as_secs()));
            }
        };

        Ok(RawOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Command runner with retry/backoff and fatal classification.
#[derive(Clone)]
pub struct CommandRunner {
    executor: Arc<dyn Executor>,
    timeout: Duration,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(Arc::new(ProcessExecutor))
    }
}

impl CommandRunner {
    /// Create a runner over the given executor.
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
        }
    }

    /// Set the per-command timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a command with up to `max_retries` attempts.
    ///
    /// Between retryable failures the caller sleeps `2^attempt` seconds
    /// (attempt counted from 0). A fatal marker aborts the budget at once.
    pub async fn run(&self, argv: &[String], max_retries: u32) -> MediaResult<CommandOutput> {
        debug!(command = %argv.join(" "), "running command");

        let mut last_stderr = String::new();

        for attempt in 0..max_retries {
            match self.executor.execute(argv, self.timeout).await {
                Ok(raw) => match classify(&raw) {
                    RunStatus::Success => {
                        return Ok(CommandOutput {
                            stdout: raw.stdout,
                            stderr: raw.stderr,
                        });
                    }
                    RunStatus::FatalFailure => {
                        let marker = FATAL_MARKERS
                            .iter()
                            .find(|m| raw.stderr.contains(*m))
                            .copied()
                            .unwrap_or("fatal")
                            .to_string();
                        warn!(marker = %marker, "fatal marker in command output, aborting retries");
                        return Err(MediaError::FatalMarker {
                            marker,
                            stderr: raw.stderr,
                        });
                    }
                    RunStatus::RetryableFailure => {
                        warn!(
                            attempt = attempt + 1,
                            max_retries,
                            exit_code = ?raw.exit_code,
                            "command failed"
                        );
                        last_stderr = raw.stderr;
                    }
                },
                Err(MediaError::Timeout(secs)) => {
                    warn!(attempt = attempt + 1, max_retries, timeout_secs = secs, "command timed out");
                    last_stderr = format!("timed out after {} seconds", secs);
                }
                // Spawn-level failures (missing binary, IO) are not retried
                Err(e) => return Err(e),
            }

            if attempt + 1 < max_retries {
                let wait = Duration::from_secs(1u64 << attempt);
                debug!(wait_secs = wait.as_secs(), "backing off before retry");
                tokio::time::sleep(wait).await;
            }
        }

        Err(MediaError::RetriesExhausted {
            attempts: max_retries,
            stderr: last_stderr,
        })
    }
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Check if FFprobe is available.
pub fn check_ffprobe() -> MediaResult<PathBuf> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)
}

/// Check if yt-dlp is available.
pub fn check_ytdlp() -> MediaResult<PathBuf> {
    which::which("yt-dlp").map_err(|_| MediaError::YtDlpNotFound)
}
