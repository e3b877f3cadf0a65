//! Content analysis: pluggable detectors producing candidate segments.
//!
//! Detectors run sequentially in a fixed order and their results are
//! concatenated as-is; overlap resolution happens later during selection.
//! A failing detector degrades to an empty contribution so one bad ffmpeg
//! pass never aborts the whole run.

pub mod audio;
pub mod scene;
pub mod visual;

use std::path::Path;

use async_trait::async_trait;
use tracing::{info, warn};

use autoclip_models::{ScoringConfig, Segment};

use crate::command::CommandRunner;
use crate::error::MediaResult;

pub use audio::{AudioPeakDetector, SpeechDetector};
pub use scene::SceneChangeDetector;
pub use visual::{FaceDetector, MotionDetector};

/// One content detection pass over the asset.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Detector name for logging and metadata.
    fn name(&self) -> &'static str;

    /// Detect candidate segments in the asset.
    async fn detect(
        &self,
        runner: &CommandRunner,
        asset: &Path,
        config: &ScoringConfig,
    ) -> MediaResult<Vec<Segment>>;
}

/// Runs every detector over an asset, in fixed order.
pub struct ContentAnalyzer {
    runner: CommandRunner,
    detectors: Vec<Box<dyn Detector>>,
}

impl ContentAnalyzer {
    /// Analyzer with the default detector set: scene changes, speech,
    /// audio peaks, motion, faces.
    pub fn new(runner: CommandRunner) -> Self {
        Self {
            runner,
            detectors: vec![
                Box::new(SceneChangeDetector),
                Box::new(SpeechDetector),
                Box::new(AudioPeakDetector),
                Box::new(MotionDetector),
                Box::new(FaceDetector),
            ],
        }
    }

    /// Replace the detector set.
    pub fn with_detectors(mut self, detectors: Vec<Box<dyn Detector>>) -> Self {
        self.detectors = detectors;
        self
    }

    /// Run all detectors and concatenate their segments.
    pub async fn analyze(&self, asset: &Path, config: &ScoringConfig) -> Vec<Segment> {
        let mut segments = Vec::new();

        for detector in &self.detectors {
            match detector.detect(&self.runner, asset, config).await {
                Ok(found) => {
                    info!(
                        detector = detector.name(),
                        segments = found.len(),
                        "detector finished"
                    );
                    segments.extend(found);
                }
                Err(e) => {
                    warn!(detector = detector.name(), error = %e, "detector failed, continuing");
                }
            }
        }

        info!(total = segments.len(), "analysis complete");
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaError;
    use crate::testutil::ScriptedExecutor;
    use autoclip_models::SegmentKind;
    use std::sync::Arc;

    struct FixedDetector {
        name: &'static str,
        segments: Vec<Segment>,
    }

    #[async_trait]
    impl Detector for FixedDetector {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn detect(
            &self,
            _runner: &CommandRunner,
            _asset: &Path,
            _config: &ScoringConfig,
        ) -> MediaResult<Vec<Segment>> {
            Ok(self.segments.clone())
        }
    }

    struct FailingDetector;

    #[async_trait]
    impl Detector for FailingDetector {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn detect(
            &self,
            _runner: &CommandRunner,
            _asset: &Path,
            _config: &ScoringConfig,
        ) -> MediaResult<Vec<Segment>> {
            Err(MediaError::probe_failed("astats pass blew up", None))
        }
    }

    fn runner() -> CommandRunner {
        CommandRunner::new(Arc::new(ScriptedExecutor::new(vec![])))
    }

    #[tokio::test]
    async fn test_detector_order_preserved_in_output() {
        let analyzer = ContentAnalyzer::new(runner()).with_detectors(vec![
            Box::new(FixedDetector {
                name: "scenes",
                segments: vec![Segment::new(0.0, 10.0, 1.0, SegmentKind::SceneChange)],
            }),
            Box::new(FixedDetector {
                name: "speech",
                segments: vec![Segment::new(5.0, 15.0, 0.8, SegmentKind::Speech)],
            }),
        ]);

        let segments = analyzer
            .analyze(Path::new("/tmp/a.mp4"), &ScoringConfig::default())
            .await;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].kind, SegmentKind::SceneChange);
        assert_eq!(segments[1].kind, SegmentKind::Speech);
    }

    #[tokio::test]
    async fn test_failing_detector_degrades_to_empty() {
        let analyzer = ContentAnalyzer::new(runner()).with_detectors(vec![
            Box::new(FailingDetector),
            Box::new(FixedDetector {
                name: "speech",
                segments: vec![Segment::new(1.0, 9.0, 0.8, SegmentKind::Speech)],
            }),
        ]);

        let segments = analyzer
            .analyze(Path::new("/tmp/a.mp4"), &ScoringConfig::default())
            .await;
        // The failure is swallowed, later detectors still contribute
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Speech);
    }
}
