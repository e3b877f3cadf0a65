//! Run orchestration: acquisition through materialization.

use std::path::PathBuf;

use tracing::{info, warn};

use autoclip_media::{
    check_ffmpeg, check_ffprobe, check_ytdlp, probe_asset, Acquisition, AcquisitionPipeline,
    AuthContext, CommandRunner, ContentAnalyzer, FetchRequest,
};
use autoclip_models::AnalysisReport;

use crate::config::AppConfig;
use crate::context::RunContext;
use crate::error::PipelineResult;
use crate::logging::RunLogger;
use crate::materialize::{write_report, Materializer};
use crate::selector;

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub acquisition: Acquisition,
    pub clips: Vec<PathBuf>,
    pub highlight_reel: Option<PathBuf>,
    pub report_path: PathBuf,
}

/// Drives one full run over a single source video.
pub struct Processor {
    config: AppConfig,
    runner: CommandRunner,
}

impl Processor {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            runner: CommandRunner::default(),
        }
    }

    /// Processor over a custom command runner (tests).
    pub fn with_runner(config: AppConfig, runner: CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Verify the external tools are on PATH.
    pub fn check_dependencies(&self) -> PipelineResult<()> {
        let ytdlp = check_ytdlp()?;
        let ffmpeg = check_ffmpeg()?;
        let ffprobe = check_ffprobe()?;
        info!(
            ytdlp = %ytdlp.display(),
            ffmpeg = %ffmpeg.display(),
            ffprobe = %ffprobe.display(),
            "external tools found"
        );
        Ok(())
    }

    /// Execute the run end to end.
    pub async fn run(&self) -> PipelineResult<RunSummary> {
        let logger = RunLogger::new("acquisition");
        logger.log_start(&format!("processing {}", self.config.video_url));

        let context = RunContext::create(&self.config.output_base_dir, &self.config.project_name)?;
        let raw_asset = context.raw_asset_path();

        // Acquisition
        let request = FetchRequest::new(
            &self.config.video_url,
            &raw_asset,
            &self.config.quality_preference,
        );
        let auth = AuthContext::discover();
        let acquisition = AcquisitionPipeline::new(self.runner.clone())
            .with_fallback_enabled(self.config.fallback_enabled)
            .acquire(&request, &auth)
            .await?;
        logger.log_completion(&format!("asset acquired via {:?}", acquisition));

        // Validation; failure degrades to an empty probe, never aborts
        let logger = logger.stage("validation");
        let video_info = match probe_asset(&self.runner, &raw_asset).await {
            Ok(info) => {
                logger.log_progress(&format!(
                    "duration {:.1}s, {} streams",
                    info.duration,
                    info.streams.len()
                ));
                info.raw
            }
            Err(e) => {
                logger.log_warning(&format!("probe failed: {}", e));
                serde_json::Value::Null
            }
        };

        // Analysis
        let logger = logger.stage("analysis");
        logger.log_start("running content detectors");
        let candidates = ContentAnalyzer::new(self.runner.clone())
            .analyze(&raw_asset, &self.config.clipping)
            .await;
        logger.log_progress(&format!("{} candidate segments", candidates.len()));

        // Selection
        let selection = selector::select(&candidates, &self.config.clipping);
        logger.log_completion(&format!(
            "{} of {} segments selected",
            selection.selected.len(),
            selection.candidates
        ));

        // Materialization
        let logger = logger.stage("materialization");
        let materializer = Materializer::new(
            self.runner.clone(),
            self.config.clipping.clone(),
            &self.config.project_name,
        );
        let clips = materializer
            .materialize(&raw_asset, &selection.selected, context.clips_dir())
            .await?;

        let highlight_reel = materializer
            .highlight_reel(
                &raw_asset,
                &selection.selected,
                context.run_dir(),
                context.temp_path(),
            )
            .await;

        let report = AnalysisReport::new(
            video_info,
            self.config.clipping.clone(),
            candidates.len(),
            selection.selected,
        );
        let report_path = write_report(&report, context.run_dir())?;

        logger.log_completion(&format!("{} clips written", clips.len()));

        let summary = RunSummary {
            acquisition,
            clips: clips.into_iter().map(|c| c.path).collect(),
            highlight_reel,
            report_path,
        };

        if !self.config.cleanup_temp_files {
            let kept = context.persist_temp();
            warn!(path = %kept.display(), "temp files kept");
        }

        Ok(summary)
    }
}
