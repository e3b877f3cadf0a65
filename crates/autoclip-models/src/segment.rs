//! Candidate segment models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The kind of content a detector identified in a segment.
///
/// Wire names follow the analysis report contract; note the face kind
/// serializes as `face_detection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    SceneChange,
    Speech,
    AudioPeak,
    Motion,
    #[serde(rename = "face_detection")]
    Face,
}

impl SegmentKind {
    /// Wire name used in reports and clip filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::SceneChange => "scene_change",
            SegmentKind::Speech => "speech",
            SegmentKind::AudioPeak => "audio_peak",
            SegmentKind::Motion => "motion",
            SegmentKind::Face => "face_detection",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored, typed time interval of the source asset.
///
/// Segments are immutable value objects: detectors create them and the
/// selector builds rescored copies rather than mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds from the beginning of the asset
    pub start_time: f64,

    /// End time in seconds (always greater than `start_time`)
    pub end_time: f64,

    /// Duration in seconds (`end_time - start_time`)
    pub duration: f64,

    /// Detector confidence, non-negative; rescored by the selector
    pub score: f64,

    /// Which detector produced this segment
    pub kind: SegmentKind,

    /// Detector-specific details (method, levels, etc.)
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Segment {
    /// Create a segment; duration is derived from the endpoints.
    pub fn new(start_time: f64, end_time: f64, score: f64, kind: SegmentKind) -> Self {
        Self {
            start_time,
            end_time,
            duration: end_time - start_time,
            score,
            kind,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Build a copy with a different score, endpoints untouched.
    pub fn rescored(&self, score: f64) -> Self {
        Self {
            score,
            ..self.clone()
        }
    }

    /// Interval overlap test: two segments overlap when they share any
    /// time range (touching endpoints do not count).
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start_time < other.end_time && self.end_time > other.start_time
    }
}
