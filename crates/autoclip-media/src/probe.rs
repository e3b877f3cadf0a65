//! FFprobe asset information.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::command::CommandRunner;
use crate::error::{MediaError, MediaResult};

/// Summary of one stream in the probed asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamInfo {
    pub codec_type: String,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Probe result for a media asset.
///
/// Used for reporting and validation only; detectors run their own passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeInfo {
    /// Duration in seconds (0 when the container does not report one)
    pub duration: f64,
    /// Stream summaries in container order
    pub streams: Vec<StreamInfo>,
    /// Raw ffprobe JSON, embedded verbatim into the analysis report
    pub raw: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<StreamInfo>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// Probe a media file for duration and stream metadata.
pub async fn probe_asset(runner: &CommandRunner, path: impl AsRef<Path>) -> MediaResult<ProbeInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    let argv: Vec<String> = [
        "ffprobe",
        "-v",
        "quiet",
        "-print_format",
        "json",
        "-show_format",
        "-show_streams",
    ]
    .iter()
    .map(|s| s.to_string())
    .chain(std::iter::once(path.to_string_lossy().to_string()))
    .collect();

    let output = runner
        .run(&argv, 1)
        .await
        .map_err(|e| MediaError::probe_failed(format!("ffprobe failed: {}", e), None))?;

    let raw: serde_json::Value = serde_json::from_str(&output.stdout)?;
    let parsed: FfprobeOutput = serde_json::from_value(raw.clone())?;

    let duration = parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    Ok(ProbeInfo {
        duration,
        streams: parsed.streams,
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ok_output_with, ScriptedExecutor};
    use std::sync::Arc;

    const SAMPLE: &str = r#"{
        "format": {"duration": "123.456", "size": "1000"},
        "streams": [
            {"codec_type": "video", "codec_name": "h264", "width": 1280, "height": 720},
            {"codec_type": "audio", "codec_name": "aac"}
        ]
    }"#;

    #[tokio::test]
    async fn test_probe_parses_duration_and_streams() {
        let executor = Arc::new(ScriptedExecutor::new(vec![Ok(ok_output_with(SAMPLE))]));
        let runner = CommandRunner::new(executor);

        // Probe target must exist on disk
        let file = tempfile::NamedTempFile::new().unwrap();
        let info = probe_asset(&runner, file.path()).await.unwrap();

        assert!((info.duration - 123.456).abs() < 1e-9);
        assert_eq!(info.streams.len(), 2);
        assert_eq!(info.streams[0].codec_type, "video");
        assert_eq!(info.streams[0].width, Some(1280));
        assert_eq!(info.raw["format"]["size"], "1000");
    }

    #[tokio::test]
    async fn test_probe_missing_file() {
        let runner = CommandRunner::default();
        let err = probe_asset(&runner, "/nonexistent/asset.mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
