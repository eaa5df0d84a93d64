//! Hybrid ranking: sort, truncate, join with catalog attributes

use crate::catalog::Catalog;
use crate::types::{RecommendedItem, ScoredCandidate};

/// Sort candidates by hybrid score descending and keep the top
/// `result_size`. Equal scores are ordered by ascending product id so
/// identical inputs always yield identical output.
///
/// An empty candidate list is not an error; it ranks to an empty list.
pub fn rank_candidates(
    mut candidates: Vec<ScoredCandidate>,
    result_size: usize,
) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| {
        b.hybrid_score
            .total_cmp(&a.hybrid_score)
            .then(a.product_id.cmp(&b.product_id))
    });
    candidates.truncate(result_size);
    candidates
}

/// Join the ranked candidates with catalog attributes, assigning ranks
/// 1..N. Candidates come from a catalog scan, so the lookup is total;
/// anything unexpectedly absent is dropped rather than invented.
pub fn to_items(ranked: &[ScoredCandidate], catalog: &Catalog) -> Vec<RecommendedItem> {
    ranked
        .iter()
        .filter_map(|c| catalog.get(c.product_id).map(|p| (c, p)))
        .enumerate()
        .map(|(i, (c, p))| RecommendedItem {
            rank: i + 1,
            product_id: p.product_id,
            product_name: p.product_name.clone(),
            department: p.department.clone(),
            aisle: p.aisle.clone(),
            hybrid_score: c.hybrid_score,
        })
        .collect()
}
