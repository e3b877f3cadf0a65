//! Run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use autoclip_models::ScoringConfig;

use crate::error::{PipelineError, PipelineResult};

/// Top-level application configuration.
///
/// Loaded from an optional JSON file, then overridden by `AUTOCLIP_*`
/// environment variables. Validated once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Source video URL
    pub video_url: String,
    /// Base directory for run outputs
    pub output_base_dir: String,
    /// Project name, used in the dated run directory and reel filename
    pub project_name: String,
    /// Retry budget handed to acquisition strategies that do not override it
    pub max_retries: u32,
    /// Quality preference (1080p/720p/480p/360p/worst)
    pub quality_preference: String,
    /// Synthesize a placeholder when every strategy fails
    pub fallback_enabled: bool,
    /// Remove the run's temp directory on completion
    pub cleanup_temp_files: bool,
    /// Scoring / detection configuration
    pub clipping: ScoringConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            video_url: "https://youtu.be/Tvz8an1znIo".to_string(),
            output_base_dir: "carousels".to_string(),
            project_name: "veo-interview".to_string(),
            max_retries: 7,
            quality_preference: "720p".to_string(),
            fallback_enabled: true,
            cleanup_temp_files: true,
            clipping: ScoringConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: file (if present) then environment overrides.
    pub fn load(path: Option<&Path>) -> PipelineResult<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "loading config file");
                let body = std::fs::read_to_string(path)?;
                serde_json::from_str(&body)?
            }
            Some(path) => {
                return Err(PipelineError::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            None => Self::default(),
        };

        config.apply_env();
        config.clipping.validate()?;
        Ok(config)
    }

    /// Apply `AUTOCLIP_*` environment overrides in place.
    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("AUTOCLIP_VIDEO_URL") {
            self.video_url = v;
        }
        if let Ok(v) = std::env::var("AUTOCLIP_OUTPUT_DIR") {
            self.output_base_dir = v;
        }
        if let Ok(v) = std::env::var("AUTOCLIP_PROJECT_NAME") {
            self.project_name = v;
        }
        if let Ok(v) = std::env::var("AUTOCLIP_MAX_RETRIES") {
            if let Ok(n) = v.parse() {
                self.max_retries = n;
            }
        }
        if let Ok(v) = std::env::var("AUTOCLIP_QUALITY") {
            self.quality_preference = v;
        }
        if let Ok(v) = std::env::var("AUTOCLIP_FALLBACK_ENABLED") {
            self.fallback_enabled = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Ok(v) = std::env::var("AUTOCLIP_CLEANUP_TEMP") {
            self.cleanup_temp_files = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Ok(v) = std::env::var("AUTOCLIP_MAX_CLIPS") {
            if let Ok(n) = v.parse() {
                self.clipping.max_clips = n;
            }
        }
        if let Ok(v) = std::env::var("AUTOCLIP_TARGET_DURATION") {
            if let Ok(n) = v.parse() {
                self.clipping.target_clip_duration = n;
            }
        }
    }
}
