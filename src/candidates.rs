//! Candidate generation from the collaborative signal

use crate::catalog::Catalog;
use crate::oracles::CollaborativeOracle;
use crate::types::{ProductId, UserId};
use std::collections::HashSet;
use tracing::debug;

/// Score every catalog product outside the excluded set and keep the
/// `pool_size` highest, descending by cf score, ties broken by ascending
/// product id.
///
/// A product the oracle does not know still participates with a zero
/// score rather than failing the request. Cost is one oracle call per
/// eligible catalog product; fine at demo scale, a catalog beyond ~10^5
/// products needs an indexed top-K retrieval instead of this scan.
pub fn generate_candidates(
    cf: &dyn CollaborativeOracle,
    catalog: &Catalog,
    user_id: UserId,
    excluded: &HashSet<ProductId>,
    pool_size: usize,
) -> Vec<(ProductId, f32)> {
    let mut scored: Vec<(ProductId, f32)> = Vec::with_capacity(catalog.len());

    for product_id in catalog.ids() {
        if excluded.contains(&product_id) {
            continue;
        }
        let score = cf.predict(user_id, product_id).unwrap_or(0.0);
        scored.push((product_id, score));
    }

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(pool_size);

    debug!(
        "Candidate pool for user {}: {} of {} catalog products",
        user_id,
        scored.len(),
        catalog.len()
    );

    scored
}
