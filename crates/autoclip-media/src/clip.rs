//! Clip extraction and concatenation.

use std::path::Path;

use tracing::debug;

use crate::command::{CommandOutput, CommandRunner};
use crate::error::{MediaError, MediaResult};

/// Retry budget for encode commands. Encodes fail deterministically far more
/// often than transiently, so one retry is enough.
const EXTRACT_RETRIES: u32 = 2;

/// Extract a clip of `duration` seconds starting at `start` into `dest`.
///
/// The cut is re-encoded (libx264/aac) rather than stream-copied so that
/// clip boundaries land exactly on `start` instead of the previous keyframe.
pub async fn extract_clip(
    runner: &CommandRunner,
    source: &Path,
    start: f64,
    duration: f64,
    dest: &Path,
) -> MediaResult<CommandOutput> {
    debug!(
        source = %source.display(),
        start,
        duration,
        dest = %dest.display(),
        "extracting clip"
    );

    let argv: Vec<String> = vec![
        "ffmpeg".to_string(),
        "-ss".to_string(),
        format!("{:.3}", start),
        "-i".to_string(),
        source.to_string_lossy().to_string(),
        "-t".to_string(),
        format!("{:.3}", duration),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        "fast".to_string(),
        "-crf".to_string(),
        "23".to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
        "-movflags".to_string(),
        "+faststart".to_string(),
        "-avoid_negative_ts".to_string(),
        "make_zero".to_string(),
        "-y".to_string(),
        dest.to_string_lossy().to_string(),
    ];

    runner.run(&argv, EXTRACT_RETRIES).await
}

/// Concatenate already-encoded clips into `dest` with the concat demuxer.
///
/// Inputs must share codec parameters (they do, coming from
/// [`extract_clip`]), so the streams are copied without re-encoding. The
/// list file lives next to `dest` and is removed afterwards.
pub async fn concat_clips(
    runner: &CommandRunner,
    clips: &[impl AsRef<Path>],
    dest: &Path,
) -> MediaResult<()> {
    if clips.is_empty() {
        return Err(MediaError::InvalidVideo(
            "cannot concatenate zero clips".to_string(),
        ));
    }

    let list_path = dest.with_extension("txt");
    let list_body: String = clips
        .iter()
        .map(|c| format!("file '{}'\n", c.as_ref().to_string_lossy()))
        .collect();
    std::fs::write(&list_path, list_body)?;

    let argv: Vec<String> = vec![
        "ffmpeg".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        list_path.to_string_lossy().to_string(),
        "-c".to_string(),
        "copy".to_string(),
        "-y".to_string(),
        dest.to_string_lossy().to_string(),
    ];

    let result = runner.run(&argv, EXTRACT_RETRIES).await;
    let _ = std::fs::remove_file(&list_path);
    result.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ok_output_with, ScriptedExecutor};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_extract_clip_command_shape() {
        let executor = Arc::new(ScriptedExecutor::new(vec![Ok(ok_output_with(""))]));
        let runner = CommandRunner::new(executor.clone());

        extract_clip(
            &runner,
            Path::new("/tmp/raw.mp4"),
            12.5,
            30.0,
            Path::new("/tmp/clip_01.mp4"),
        )
        .await
        .unwrap();

        let argv = &executor.invocations()[0];
        assert_eq!(argv[0], "ffmpeg");
        // Seek precedes the input for fast seeking
        let ss = argv.iter().position(|a| a == "-ss").unwrap();
        let input = argv.iter().position(|a| a == "-i").unwrap();
        assert!(ss < input);
        assert_eq!(argv[ss + 1], "12.500");
        let t = argv.iter().position(|a| a == "-t").unwrap();
        assert_eq!(argv[t + 1], "30.000");
        assert!(argv.contains(&"+faststart".to_string()));
        assert!(argv.contains(&"make_zero".to_string()));
        assert_eq!(argv.last().unwrap(), "/tmp/clip_01.mp4");
    }

    #[tokio::test]
    async fn test_concat_writes_list_and_copies_streams() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("highlights.mp4");

        let executor = Arc::new(ScriptedExecutor::new(vec![Ok(ok_output_with(""))]));
        let runner = CommandRunner::new(executor.clone());

        concat_clips(
            &runner,
            &[dir.path().join("a.mp4"), dir.path().join("b.mp4")],
            &dest,
        )
        .await
        .unwrap();

        let argv = &executor.invocations()[0];
        assert!(argv.contains(&"concat".to_string()));
        assert!(argv.contains(&"copy".to_string()));
        // The list file is cleaned up after the run
        assert!(!dest.with_extension("txt").exists());
    }

    #[tokio::test]
    async fn test_concat_rejects_empty_input() {
        let runner = CommandRunner::default();
        let err = concat_clips(&runner, &Vec::<std::path::PathBuf>::new(), Path::new("/tmp/x.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::InvalidVideo(_)));
    }
}
