//! Placeholder asset synthesis.
//!
//! When every fetch strategy fails, downstream stages still need a usable
//! file. The generator renders a solid color with an audible tone and an
//! overlay caption via ffmpeg's lavfi sources.

use std::path::Path;

use tracing::info;

use crate::command::CommandRunner;
use crate::error::{MediaError, MediaResult};

/// Retry budget for the synthesis command.
const FALLBACK_RETRIES: u32 = 3;

/// Synthesizes the fallback asset.
#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    /// Placeholder duration in seconds
    pub duration_secs: u32,
    /// Overlay caption
    pub caption: String,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self {
            duration_secs: 30,
            caption: "Download Failed - Fallback Video".to_string(),
        }
    }
}

impl FallbackGenerator {
    /// Render the placeholder to `dest`.
    pub async fn generate(&self, runner: &CommandRunner, dest: &Path) -> MediaResult<()> {
        info!(dest = %dest.display(), duration_secs = self.duration_secs, "creating fallback asset");

        let color_input = format!("color=red:size=640x360:duration={}", self.duration_secs);
        let sine_input = format!("sine=frequency=440:duration={}", self.duration_secs);
        let drawtext = format!(
            "drawtext=text='{}':fontsize=24:fontcolor=white:x=(w-text_w)/2:y=(h-text_h)/2",
            self.caption
        );

        let argv: Vec<String> = vec![
            "ffmpeg".to_string(),
            "-f".to_string(),
            "lavfi".to_string(),
            "-i".to_string(),
            color_input,
            "-f".to_string(),
            "lavfi".to_string(),
            "-i".to_string(),
            sine_input,
            "-vf".to_string(),
            drawtext,
            "-c:v".to_string(),
            "libx264".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-y".to_string(),
            dest.to_string_lossy().to_string(),
        ];

        runner
            .run(&argv, FALLBACK_RETRIES)
            .await
            .map_err(|e| MediaError::download_failed(format!("fallback synthesis failed: {}", e)))?;

        Ok(())
    }
}
