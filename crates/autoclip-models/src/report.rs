//! Per-run analysis report.
//!
//! One JSON report is written per run, listing the final selected segments
//! and per-kind counts. Field names here are a stable contract consumed by
//! downstream tooling.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;
use crate::segment::Segment;

/// Summary statistics over the selected segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of selected segments
    pub total_segments: usize,
    /// Count of segments per kind (wire names)
    pub by_type: BTreeMap<String, usize>,
    /// Mean final score (0 when no segments)
    pub average_score: f64,
    /// Sum of selected segment durations in seconds
    pub total_clip_duration: f64,
}

/// The full analysis report for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// When the analysis completed
    pub analysis_timestamp: DateTime<Utc>,
    /// Probe output for the source asset (raw ffprobe-shaped JSON)
    pub video_info: serde_json::Value,
    /// The scoring configuration used
    pub config: ScoringConfig,
    /// Number of candidate segments before selection
    pub segments_found: usize,
    /// Final selected segments in selection order
    pub segments: Vec<Segment>,
    /// Aggregate statistics
    pub summary: ReportSummary,
}

impl AnalysisReport {
    /// Build a report from the selection result.
    pub fn new(
        video_info: serde_json::Value,
        config: ScoringConfig,
        segments_found: usize,
        selected: Vec<Segment>,
    ) -> Self {
        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        for segment in &selected {
            *by_type.entry(segment.kind.as_str().to_string()).or_insert(0) += 1;
        }

        let average_score = if selected.is_empty() {
            0.0
        } else {
            selected.iter().map(|s| s.score).sum::<f64>() / selected.len() as f64
        };
        let total_clip_duration = selected.iter().map(|s| s.duration).sum();

        Self {
            analysis_timestamp: Utc::now(),
            video_info,
            config,
            segments_found,
            summary: ReportSummary {
                total_segments: selected.len(),
                by_type,
                average_score,
                total_clip_duration,
            },
            segments: selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentKind;

    #[test]
    fn test_summary_counts() {
        let selected = vec![
            Segment::new(0.0, 10.0, 1.0, SegmentKind::SceneChange),
            Segment::new(20.0, 30.0, 1.2, SegmentKind::Speech),
            Segment::new(40.0, 50.0, 0.9, SegmentKind::Speech),
        ];
        let report = AnalysisReport::new(
            serde_json::json!({}),
            ScoringConfig::default(),
            7,
            selected,
        );

        assert_eq!(report.segments_found, 7);
        assert_eq!(report.summary.total_segments, 3);
        assert_eq!(report.summary.by_type.get("speech"), Some(&2));
        assert_eq!(report.summary.by_type.get("scene_change"), Some(&1));
        assert!((report.summary.average_score - (1.0 + 1.2 + 0.9) / 3.0).abs() < 1e-9);
        assert!((report.summary.total_clip_duration - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_selection() {
        let report = AnalysisReport::new(
            serde_json::json!(null),
            ScoringConfig::default(),
            0,
            Vec::new(),
        );
        assert_eq!(report.summary.total_segments, 0);
        assert_eq!(report.summary.average_score, 0.0);
    }

    #[test]
    fn test_report_field_names() {
        let report = AnalysisReport::new(
            serde_json::json!({}),
            ScoringConfig::default(),
            1,
            vec![Segment::new(0.0, 10.0, 1.0, SegmentKind::Face)],
        );
        let value = serde_json::to_value(&report).unwrap();

        assert!(value.get("analysis_timestamp").is_some());
        let seg = &value["segments"][0];
        assert!(seg.get("start_time").is_some());
        assert!(seg.get("end_time").is_some());
        assert!(seg.get("duration").is_some());
        assert!(seg.get("score").is_some());
        assert_eq!(seg["kind"], "face_detection");
        assert_eq!(value["summary"]["by_type"]["face_detection"], 1);
    }
}
