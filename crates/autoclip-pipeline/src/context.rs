//! Per-run filesystem context.

use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::PipelineResult;

/// Owns the run's working and output directories.
///
/// The temp dir holds the raw asset and intermediate files; it is removed
/// when the context is dropped on any exit path. Outputs land under
/// `<base>/<YYYY-MM-DD>-<project>/auto_clips/`.
pub struct RunContext {
    temp_dir: TempDir,
    run_dir: PathBuf,
    clips_dir: PathBuf,
}

impl RunContext {
    /// Create the directory layout for one run.
    pub fn create(output_base_dir: &str, project_name: &str) -> PipelineResult<Self> {
        let temp_dir = tempfile::Builder::new().prefix("autoclip-").tempdir()?;

        let date = Local::now().format("%Y-%m-%d");
        let run_dir = Path::new(output_base_dir).join(format!("{}-{}", date, project_name));
        let clips_dir = run_dir.join("auto_clips");
        std::fs::create_dir_all(&clips_dir)?;

        info!(
            temp = %temp_dir.path().display(),
            output = %run_dir.display(),
            "run context created"
        );

        Ok(Self {
            temp_dir,
            run_dir,
            clips_dir,
        })
    }

    /// Scratch directory, removed with the context.
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Destination for the raw downloaded asset.
    pub fn raw_asset_path(&self) -> PathBuf {
        self.temp_dir.path().join("raw_video.mp4")
    }

    /// Dated run directory (report lives here).
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Directory for extracted clips and their sidecars.
    pub fn clips_dir(&self) -> &Path {
        &self.clips_dir
    }

    /// Keep the temp directory on disk (debugging aid).
    pub fn persist_temp(self) -> PathBuf {
        let path = self.temp_dir.keep();
        debug!(path = %path.display(), "temp directory persisted");
        path
    }
}
