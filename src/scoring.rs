//! Score normalization and hybrid combination

use crate::types::HybridWeights;

/// Guards the min-max divisor when an entire column is equal-valued.
/// With all scores equal the numerator is 0, so every normalized value
/// degenerates to 0 rather than 0/0.
pub const NORM_EPSILON: f32 = 1e-10;

/// Min-max normalize one raw score column onto [0,1].
///
/// All values derived from the same column share the same divisor;
/// an all-equal column normalizes to all zeros.
pub fn min_max_normalize(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return vec![];
    }

    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for &s in scores {
        min = min.min(s);
        max = max.max(s);
    }

    scores
        .iter()
        .map(|&s| (s - min) / (max - min + NORM_EPSILON))
        .collect()
}

/// Normalize the content column: min-max, then divide every value by the
/// column's resulting maximum when that maximum is positive.
///
/// The second rescale mirrors the reference pipeline verbatim; ranking
/// parity requires keeping both steps. A zero maximum (no content signal
/// at all, e.g. empty history) skips the rescale so nothing divides by
/// zero.
pub fn normalize_content_column(scores: &[f32]) -> Vec<f32> {
    let mut norms = min_max_normalize(scores);

    let max = norms.iter().copied().fold(0.0f32, f32::max);
    if max > 0.0 {
        for n in &mut norms {
            *n /= max;
        }
    }

    norms
}

/// Weighted combination of the two normalized signals
pub fn hybrid_score(cf_norm: f32, content_norm: f32, weights: &HybridWeights) -> f32 {
    weights.cf * cf_norm + weights.content * content_norm
}
