//! Content affinity against recent purchase history

use crate::oracles::SimilarityOracle;
use crate::types::{ProductId, RECENCY_WINDOW};

/// Compute each candidate's raw content score: the mean similarity to the
/// last `RECENCY_WINDOW` history entries, averaged over the values the
/// oracle actually produced. History items unknown to the oracle are
/// skipped. No history, or no value obtained, scores 0.
///
/// Output ordering matches the candidate ordering.
pub fn content_affinity(
    sim: &dyn SimilarityOracle,
    candidates: &[(ProductId, f32)],
    history: &[ProductId],
) -> Vec<f32> {
    let window = recent_window(history);

    candidates
        .iter()
        .map(|&(candidate, _)| affinity_for(sim, candidate, window))
        .collect()
}

fn affinity_for(sim: &dyn SimilarityOracle, candidate: ProductId, window: &[ProductId]) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0usize;

    for &hist in window {
        if let Ok(s) = sim.similarity(hist, candidate) {
            sum += s;
            count += 1;
        }
    }

    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

/// The last `RECENCY_WINDOW` entries of a most-recent-last history
fn recent_window(history: &[ProductId]) -> &[ProductId] {
    let start = history.len().saturating_sub(RECENCY_WINDOW);
    &history[start..]
}
