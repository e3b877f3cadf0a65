//! Audio-based detection: speech runs and loudness peaks.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use autoclip_models::{ScoringConfig, Segment, SegmentKind};

use crate::analyze::Detector;
use crate::command::CommandRunner;
use crate::error::MediaResult;

/// dB value substituted for silent (`-inf`) samples.
const SILENCE_FLOOR_DB: f64 = -100.0;

/// Raw score for a detected speech run.
const SPEECH_SCORE: f64 = 0.8;

/// One `(timestamp, rms_level)` sample from the astats stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSample {
    pub time: f64,
    pub level_db: f64,
}

/// Detects sustained audio activity from the per-frame RMS level stream.
///
/// "Speech" here means loudness above the silence threshold held for at
/// least the minimum clip duration; there is no language model involved.
pub struct SpeechDetector;

#[async_trait]
impl Detector for SpeechDetector {
    fn name(&self) -> &'static str {
        "speech"
    }

    async fn detect(
        &self,
        runner: &CommandRunner,
        asset: &Path,
        config: &ScoringConfig,
    ) -> MediaResult<Vec<Segment>> {
        if !config.audio_analysis_enabled {
            return Ok(Vec::new());
        }

        let movie = format!(
            "amovie={},astats=metadata=1:reset=1",
            asset.to_string_lossy()
        );
        let argv: Vec<String> = [
            "ffprobe",
            "-v",
            "quiet",
            "-f",
            "lavfi",
            "-i",
            &movie,
            "-show_entries",
            "frame=pkt_pts_time:frame_tags=lavfi.astats.Overall.RMS_level",
            "-of",
            "csv=p=0",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let output = runner.run(&argv, 1).await?;
        let samples = parse_level_stream(&output.stdout);
        debug!(samples = samples.len(), "rms level samples parsed");

        Ok(speech_segments_from_levels(
            &samples,
            config.audio_silence_threshold,
            config.min_clip_duration,
        ))
    }
}

/// Parse the csv `time,level` stream; `inf`/unparseable levels become the
/// silence floor.
pub fn parse_level_stream(stdout: &str) -> Vec<LevelSample> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut parts = line.trim().split(',');
            let time = parts.next()?.parse::<f64>().ok()?;
            let level_db = match parts.next()? {
                raw if raw.contains("inf") => SILENCE_FLOOR_DB,
                raw => raw.parse::<f64>().unwrap_or(SILENCE_FLOOR_DB),
            };
            Some(LevelSample { time, level_db })
        })
        .collect()
}

/// Run-length encode samples above `threshold_db` into speech segments.
///
/// A run only becomes a segment once a below-threshold sample closes it and
/// the run spans at least `min_duration`. A run still open at end of stream
/// is discarded.
pub fn speech_segments_from_levels(
    samples: &[LevelSample],
    threshold_db: f64,
    min_duration: f64,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run_start: Option<f64> = None;

    for sample in samples {
        if sample.level_db > threshold_db {
            run_start.get_or_insert(sample.time);
        } else if let Some(start) = run_start.take() {
            if sample.time - start >= min_duration {
                segments.push(
                    Segment::new(start, sample.time, SPEECH_SCORE, SegmentKind::Speech)
                        .with_metadata("method", serde_json::json!("rms_level_threshold")),
                );
            }
        }
    }

    segments
}

/// Placeholder for loudness-spike detection.
///
/// TODO: wire up an ebur128 momentary-loudness pass once clips from the rms
/// detector prove insufficient for music-heavy sources.
pub struct AudioPeakDetector;

#[async_trait]
impl Detector for AudioPeakDetector {
    fn name(&self) -> &'static str {
        "audio_peak"
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
