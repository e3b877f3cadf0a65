//! Scene-change detection via ffmpeg's scene filter.

use std::path::Path;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use autoclip_models::{ScoringConfig, Segment, SegmentKind};

use crate::analyze::Detector;
use crate::command::CommandRunner;
use crate::error::MediaResult;

/// Detects hard cuts with `select='gt(scene,threshold)',showinfo` and turns
/// consecutive cut timestamps into candidate segments.
pub struct SceneChangeDetector;

#[async_trait]
impl Detector for SceneChangeDetector {
    fn name(&self) -> &'static str {
        "scene_change"
    }

    async fn detect(
        &self,
        runner: &CommandRunner,
        asset: &Path,
        config: &ScoringConfig,
    ) -> MediaResult<Vec<Segment>> {
        let filter = format!("select='gt(scene,{})',showinfo", config.scene_threshold);
        let argv: Vec<String> = [
            "ffmpeg",
            "-i",
            &asset.to_string_lossy(),
            "-filter:v",
            &filter,
            "-f",
            "null",
            "-",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        // showinfo reports frames on stderr with the rest of ffmpeg's chatter
        let output = runner.run(&argv, 1).await?;
        let timestamps = parse_scene_timestamps(&output.stderr);
        debug!(cuts = timestamps.len(), "scene cuts found");

        Ok(segments_from_cuts(&timestamps, config.min_clip_duration))
    }
}

/// Pull `pts_time:` values out of showinfo frame lines.
pub fn parse_scene_timestamps(stderr: &str) -> Vec<f64> {
    let re = Regex::new(r"pts_time:(\d+\.?\d*)").unwrap();
    re.captures_iter(stderr)
        .filter_map(|c| c[1].parse::<f64>().ok())
        .collect()
}

/// Pair up consecutive cut timestamps into segments, keeping only pairs at
/// least `min_duration` apart.
pub fn segments_from_cuts(timestamps: &[f64], min_duration: f64) -> Vec<Segment> {
    timestamps
        .windows(2)
        .filter(|w| w[1] - w[0] >= min_duration)
        .map(|w| {
            Segment::new(w[0], w[1], 1.0, SegmentKind::SceneChange)
                .with_metadata("method", serde_json::json!("ffmpeg_scene_detection"))
        })
        .collect()
}
