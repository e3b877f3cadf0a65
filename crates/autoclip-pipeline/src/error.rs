//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),

    #[error("Invalid scoring configuration: {0}")]
    Scoring(#[from] autoclip_models::ConfigError),

    #[error("Media error: {0}")]
    Media(#[from] autoclip_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn processing_failed(msg: impl Into<String>) -> Self {
        Self::ProcessingFailed(msg.into())
    }

    /// True when the run ended because every acquisition path, including the
    /// fallback, failed. The binary maps this to a non-zero exit.
    pub fn is_exhaustion(&self) -> bool {
        matches!(
            self,
            PipelineError::Media(autoclip_media::MediaError::AcquisitionExhausted { .. })
        )
    }
}
