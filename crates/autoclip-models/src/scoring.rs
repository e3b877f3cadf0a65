//! Scoring and clipping configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by configuration validation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("target_clip_duration must be positive, got {0}")]
    InvalidTargetDuration(f64),

    #[error("min_clip_duration must be positive, got {0}")]
    InvalidMinDuration(f64),

    #[error("max_clip_duration {max} must not be below min_clip_duration {min}")]
    InvalidDurationRange { min: f64, max: f64 },

    #[error("max_clips must be at least 1")]
    InvalidMaxClips,

    #[error("scene_threshold must be within (0.0, 1.0], got {0}")]
    InvalidSceneThreshold(f64),
}

/// Configuration for scoring, selection and detector thresholds.
///
/// Loaded once per run and read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Scene change sensitivity (0.1-1.0)
    pub scene_threshold: f64,
    /// Minimum clip length in seconds
    pub min_clip_duration: f64,
    /// Maximum clip length in seconds
    pub max_clip_duration: f64,
    /// Preferred clip length in seconds
    pub target_clip_duration: f64,
    /// Maximum number of clips to select
    pub max_clips: usize,

    /// dB threshold below which audio counts as silence
    pub audio_silence_threshold: f64,
    /// Run the audio detectors
    pub audio_analysis_enabled: bool,
    /// Run the motion detector
    pub motion_analysis_enabled: bool,
    /// Run the face detector
    pub face_detection_enabled: bool,

    /// Prioritize clips with faces (x1.3)
    pub prefer_faces: bool,
    /// Prioritize clips with speech (x1.5)
    pub prefer_speech: bool,
    /// Prioritize clips with movement (x1.2)
    pub prefer_motion: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scene_threshold: 0.3,
            min_clip_duration: 5.0,
            max_clip_duration: 60.0,
            target_clip_duration: 30.0,
            max_clips: 10,
            audio_silence_threshold: -40.0,
            audio_analysis_enabled: true,
            motion_analysis_enabled: true,
            face_detection_enabled: true,
            prefer_faces: true,
            prefer_speech: true,
            prefer_motion: true,
        }
    }
}

impl ScoringConfig {
    /// Validate the configuration.
    ///
    /// The selector assumes a positive target duration (it divides by it),
    /// so a zero or negative target is rejected here, not there.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.target_clip_duration > 0.0) {
            return Err(ConfigError::InvalidTargetDuration(self.target_clip_duration));
        }
        if !(self.min_clip_duration > 0.0) {
            return Err(ConfigError::InvalidMinDuration(self.min_clip_duration));
        }
        if self.max_clip_duration < self.min_clip_duration {
            return Err(ConfigError::InvalidDurationRange {
                min: self.min_clip_duration,
                max: self.max_clip_duration,
            });
        }
        if self.max_clips == 0 {
            return Err(ConfigError::InvalidMaxClips);
        }
        if !(self.scene_threshold > 0.0 && self.scene_threshold <= 1.0) {
            return Err(ConfigError::InvalidSceneThreshold(self.scene_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_target_duration_rejected() {
        let config = ScoringConfig {
            target_clip_duration: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTargetDuration(0.0))
        );
    }

    #[test]
    fn test_nan_target_duration_rejected() {
        let config = ScoringConfig {
            target_clip_duration: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_clips_rejected() {
        let config = ScoringConfig {
            max_clips: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxClips));
    }

    #[test]
    fn test_inverted_duration_range_rejected() {
        let config = ScoringConfig {
            min_clip_duration: 30.0,
            max_clip_duration: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDurationRange { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"max_clips": 5, "prefer_speech": false}"#).unwrap();
        assert_eq!(config.max_clips, 5);
        assert!(!config.prefer_speech);
        assert!((config.target_clip_duration - 30.0).abs() < f64::EPSILON);
    }
}
