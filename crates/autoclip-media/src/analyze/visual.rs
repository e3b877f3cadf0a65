//! Visual detection placeholders.
//!
//! Motion and face passes require a frame-level vision stack; until one is
//! wired in they contribute nothing. Empty output is a valid detector
//! result, so the analyzer and selector behave identically with or without
//! them.

use std::path::Path;

use async_trait::async_trait;

use autoclip_models::{ScoringConfig, Segment};

use crate::analyze::Detector;
use crate::command::CommandRunner;
use crate::error::MediaResult;

pub struct MotionDetector;

#[async_trait]
impl Detector for MotionDetector {
    fn name(&self) -> &'static str {
        "motion"
    }

    async fn detect(
        &self,
        _runner: &CommandRunner,
        _asset: &Path,
        _config: &ScoringConfig,
    ) -> MediaResult<Vec<Segment>> {
        Ok(Vec::new())
    }
}

pub struct FaceDetector;

#[async_trait]
impl Detector for FaceDetector {
    fn name(&self) -> &'static str {
        "face_detection"
    }

    async fn detect(
        &self,
        _runner: &CommandRunner,
        _asset: &Path,
        _config: &ScoringConfig,
    ) -> MediaResult<Vec<Segment>> {
        Ok(Vec::new())
    }
}
