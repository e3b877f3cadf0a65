//! Segment scoring and selection.
//!
//! Rescores every candidate with kind-preference multipliers and a
//! duration-proximity factor, then greedily picks non-overlapping segments
//! in descending score order. The greedy pick is intentional: a globally
//! optimal weighted-interval schedule would change which clips users see
//! for the same input.

use tracing::{debug, info};

use autoclip_models::{ScoringConfig, Segment, SegmentKind};

/// Floor for the duration-proximity factor.
const DURATION_FACTOR_FLOOR: f64 = 0.5;

/// Kind preference multipliers.
const SPEECH_MULTIPLIER: f64 = 1.5;
const FACE_MULTIPLIER: f64 = 1.3;
const MOTION_MULTIPLIER: f64 = 1.2;

/// Outcome of a selection pass.
#[derive(Debug, Clone)]
pub struct SelectionResult {
    /// Accepted segments, in descending rescored-score order
    pub selected: Vec<Segment>,
    /// Number of candidates considered before selection
    pub candidates: usize,
}

/// Preference multiplier for a segment kind under this config.
fn kind_multiplier(kind: SegmentKind, config: &ScoringConfig) -> f64 {
    match kind {
        SegmentKind::Speech if config.prefer_speech => SPEECH_MULTIPLIER,
        SegmentKind::Face if config.prefer_faces => FACE_MULTIPLIER,
        SegmentKind::Motion if config.prefer_motion => MOTION_MULTIPLIER,
        _ => 1.0,
    }
}

/// Proximity of `duration` to the target, floored at 0.5.
///
/// Assumes a positive target duration; config validation rejects anything
/// else before a selector is ever built.
fn duration_factor(duration: f64, target: f64) -> f64 {
    let deviation = (duration - target).abs() / target;
    (1.0 - deviation).max(DURATION_FACTOR_FLOOR)
}

/// Build a rescored copy of a segment.
pub fn rescore(segment: &Segment, config: &ScoringConfig) -> Segment {
    let score = segment.score
        * kind_multiplier(segment.kind, config)
        * duration_factor(segment.duration, config.target_clip_duration);
    segment.rescored(score)
}

/// Rescore candidates and greedily select non-overlapping segments.
///
/// The sort is stable, so equal-scored candidates keep their input order.
/// Empty input is a valid run, not an error.
pub fn select(segments: &[Segment], config: &ScoringConfig) -> SelectionResult {
    let candidates = segments.len();

    let mut rescored: Vec<Segment> = segments.iter().map(|s| rescore(s, config)).collect();
    rescored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    let mut selected: Vec<Segment> = Vec::new();
    for candidate in rescored {
        if selected.len() >= config.max_clips {
            break;
        }
        if selected.iter().any(|s| s.overlaps(&candidate)) {
            debug!(
                start = candidate.start_time,
                end = candidate.end_time,
                "candidate overlaps an accepted segment, skipping"
            );
            continue;
        }
        selected.push(candidate);
    }

    info!(
        candidates,
        selected = selected.len(),
        "segment selection complete"
    );

    SelectionResult {
        selected,
        candidates,
    }
}
