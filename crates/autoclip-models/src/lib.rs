//! Shared data models for the autoclip pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Candidate segments produced by content detectors
//! - Scoring configuration and its validation
//! - The per-run analysis report
//! - Video resource reference helpers (YouTube URL forms)

pub mod report;
pub mod resource;
pub mod scoring;
pub mod segment;
pub mod timestamp;

// Re-export common types
pub use report::{AnalysisReport, ReportSummary};
pub use resource::{alternate_watch_url, extract_video_id, VideoIdError, VideoIdResult};
pub use scoring::{ConfigError, ScoringConfig};
pub use segment::{Segment, SegmentKind};
pub use timestamp::format_timestamp;
