#![deny(unreachable_patterns)]
//! External-tool wrapper for video acquisition and analysis.
//!
//! This crate provides:
//! - Command execution with timeout, retries and fatal-marker classification
//! - The ordered yt-dlp acquisition pipeline with fallback synthesis
//! - ffprobe asset probing
//! - Pluggable content detectors (scene changes, speech, audio/visual stubs)
//! - Clip extraction and concatenation via ffmpeg

pub mod acquire;
pub mod analyze;
pub mod clip;
pub mod command;
pub mod error;
pub mod probe;

#[cfg(test)]
pub(crate) mod testutil;

pub use acquire::{
    acquire_asset, default_strategies, Acquisition, AcquisitionPipeline, AuthContext,
    FallbackGenerator, FetchRequest, FetchStrategy,
};
pub use analyze::{ContentAnalyzer, Detector};
pub use clip::{concat_clips, extract_clip};
pub use command::{
    check_ffmpeg, check_ffprobe, check_ytdlp, classify, CommandOutput, CommandRunner, Executor,
    ProcessExecutor, RawOutput, RunStatus, FATAL_MARKERS,
};
pub use error::{MediaError, MediaResult};
pub use probe::{probe_asset, ProbeInfo, StreamInfo};
