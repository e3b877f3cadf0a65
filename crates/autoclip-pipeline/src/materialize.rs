//! Clip materialization: turn selected segments into files on disk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use autoclip_media::{concat_clips, extract_clip, CommandRunner};
use autoclip_models::{format_timestamp, AnalysisReport, ScoringConfig, Segment};

use crate::error::PipelineResult;

/// Maximum number of segments in the highlight reel.
const REEL_MAX_SEGMENTS: usize = 5;

/// Per-segment cap inside the reel, in seconds.
const REEL_SEGMENT_CAP_SECS: f64 = 10.0;

/// Sidecar metadata written next to each clip.
#[derive(Debug, Serialize)]
struct ClipSidecar<'a> {
    clip_file: String,
    start_time: f64,
    end_time: f64,
    start_timestamp: String,
    duration: f64,
    score: f64,
    kind: &'a str,
    metadata: &'a std::collections::BTreeMap<String, serde_json::Value>,
}

/// One materialized clip.
#[derive(Debug, Clone)]
pub struct MaterializedClip {
    pub path: PathBuf,
    pub segment: Segment,
}

/// Extracts selected segments into the clips directory.
pub struct Materializer {
    runner: CommandRunner,
    config: ScoringConfig,
    project_name: String,
}

impl Materializer {
    pub fn new(runner: CommandRunner, config: ScoringConfig, project_name: &str) -> Self {
        Self {
            runner,
            config,
            project_name: project_name.to_string(),
        }
    }

    /// Cut every selected segment into `clips_dir`, with a JSON sidecar per
    /// clip.
    ///
    /// When selection produced nothing, a single clip of the target duration
    /// is cut from the start of the asset so the run still has output.
    pub async fn materialize(
        &self,
        source: &Path,
        segments: &[Segment],
        clips_dir: &Path,
    ) -> PipelineResult<Vec<MaterializedClip>> {
        if segments.is_empty() {
            warn!("no segments selected, cutting a single clip from the start");
            return self.fallback_clip(source, clips_dir).await;
        }

        let mut clips = Vec::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            let filename = format!("clip_{:02}_{}.mp4", index + 1, segment.kind);
            let dest = clips_dir.join(&filename);
            let duration = segment.duration.min(self.config.max_clip_duration);

            match extract_clip(&self.runner, source, segment.start_time, duration, &dest).await {
                Ok(_) => {
                    self.write_sidecar(&dest, &filename, segment)?;
                    info!(clip = %filename, "clip extracted");
                    clips.push(MaterializedClip {
                        path: dest,
                        segment: segment.clone(),
                    });
                }
                Err(e) => {
                    warn!(clip = %filename, error = %e, "clip extraction failed, skipping");
                }
            }
        }

        Ok(clips)
    }

    async fn fallback_clip(
        &self,
        source: &Path,
        clips_dir: &Path,
    ) -> PipelineResult<Vec<MaterializedClip>> {
        let dest = clips_dir.join("clip_01_fallback.mp4");
        extract_clip(
            &self.runner,
            source,
            0.0,
            self.config.target_clip_duration,
            &dest,
        )
        .await?;

        let segment = Segment::new(
            0.0,
            self.config.target_clip_duration,
            0.0,
            autoclip_models::SegmentKind::SceneChange,
        );
        self.write_sidecar(&dest, "clip_01_fallback.mp4", &segment)?;
        Ok(vec![MaterializedClip {
            path: dest,
            segment,
        }])
    }

    fn write_sidecar(&self, clip_path: &Path, filename: &str, segment: &Segment) -> PipelineResult<()> {
        let sidecar = ClipSidecar {
            clip_file: filename.to_string(),
            start_time: segment.start_time,
            end_time: segment.end_time,
            start_timestamp: format_timestamp(segment.start_time),
            duration: segment.duration,
            score: segment.score,
            kind: segment.kind.as_str(),
            metadata: &segment.metadata,
        };
        let path = clip_path.with_extension("json");
        std::fs::write(&path, serde_json::to_string_pretty(&sidecar)?)?;
        Ok(())
    }

    /// Build the highlight reel from the top selected segments.
    ///
    /// Requires at least two segments; each contribution is capped at 10
    /// seconds. Reel failure never fails the run.
    pub async fn highlight_reel(
        &self,
        source: &Path,
        segments: &[Segment],
        run_dir: &Path,
        temp_dir: &Path,
    ) -> Option<PathBuf> {
        if segments.len() < 2 {
            info!("fewer than two segments, skipping highlight reel");
            return None;
        }

        let mut parts = Vec::new();
        for (index, segment) in segments.iter().take(REEL_MAX_SEGMENTS).enumerate() {
            let dest = temp_dir.join(format!("reel_part_{:02}.mp4", index + 1));
            let duration = segment.duration.min(REEL_SEGMENT_CAP_SECS);
            match extract_clip(&self.runner, source, segment.start_time, duration, &dest).await {
                Ok(_) => parts.push(dest),
                Err(e) => {
                    warn!(part = index + 1, error = %e, "reel part extraction failed");
                }
            }
        }

        if parts.len() < 2 {
            warn!("not enough reel parts extracted, skipping highlight reel");
            return None;
        }

        let reel = run_dir.join(format!("{}_highlights.mp4", self.project_name));
        match concat_clips(&self.runner, &parts, &reel).await {
            Ok(()) => {
                info!(reel = %reel.display(), parts = parts.len(), "highlight reel created");
                Some(reel)
            }
            Err(e) => {
                warn!(error = %e, "highlight reel concat failed");
                None
            }
        }
    }
}

/// Write the analysis report into the run directory.
pub fn write_report(report: &AnalysisReport, run_dir: &Path) -> PipelineResult<PathBuf> {
    let path = run_dir.join("analysis_report.json");
    std::fs::write(&path, serde_json::to_string_pretty(report)?)?;
    info!(path = %path.display(), "analysis report written");
    Ok(path)
}
