//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while driving external media tools.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("command failed: {message}")]
    CommandFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("fatal condition reported by tool: {marker}")]
    FatalMarker { marker: String, stderr: String },

    #[error("command failed after {attempts} attempts")]
    RetriesExhausted { attempts: u32, stderr: String },

    #[error("command timed out after {0} seconds")]
    Timeout(u64),

    #[error("probe failed: {message}")]
    ProbeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("download failed: {message}")]
    DownloadFailed { message: String },

    #[error("all acquisition strategies and the fallback generator failed: {message}")]
    AcquisitionExhausted { message: String },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid video file: {0}")]
    InvalidVideo(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create a command failure error.
    pub fn command_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::CommandFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create a download failure error.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }

    /// Create a probe failure error.
    pub fn probe_failed(message: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ProbeFailed {
            message: message.into(),
            stderr,
        }
    }

    /// Create an acquisition exhaustion error.
    pub fn exhausted(message: impl Into<String>) -> Self {
        Self::AcquisitionExhausted {
            message: message.into(),
        }
    }

    /// True for failures worth another attempt of the same command.
    ///
    /// Fatal markers and exhaustion are final; timeouts and plain non-zero
    /// exits are transient.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MediaError::Timeout(_) | MediaError::CommandFailed { .. }
        )
    }

    /// True when a tool reported a condition that retries cannot fix.
    pub fn is_fatal_marker(&self) -> bool {
        matches!(self, MediaError::FatalMarker { .. })
    }
}
