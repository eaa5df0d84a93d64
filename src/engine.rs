//! Core recommendation engine orchestrating the hybrid pipeline

use crate::affinity::content_affinity;
use crate::candidates::generate_candidates;
use crate::catalog::Catalog;
use crate::error::RecommendError;
use crate::explain::explain_recommendation;
use crate::oracles::{CollaborativeOracle, SimilarityOracle};
use crate::ranking::{rank_candidates, to_items};
use crate::scoring::{hybrid_score, min_max_normalize, normalize_content_column};
use crate::types::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Main recommendation engine (thread-safe via Arc).
///
/// Holds the three shared artifacts — catalog, collaborative model,
/// similarity model — loaded once at startup and read-only for the
/// process lifetime. Requests are independent and stateless; handlers
/// may run concurrently without locking.
pub struct RecommenderEngine {
    catalog: Arc<Catalog>,
    cf: Arc<dyn CollaborativeOracle>,
    sim: Arc<dyn SimilarityOracle>,
    default_weights: HybridWeights,
}

pub type SharedEngine = Arc<RecommenderEngine>;

impl RecommenderEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        cf: Arc<dyn CollaborativeOracle>,
        sim: Arc<dyn SimilarityOracle>,
        default_weights: HybridWeights,
    ) -> SharedEngine {
        Arc::new(Self {
            catalog,
            cf,
            sim,
            default_weights,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn default_weights(&self) -> HybridWeights {
        self.default_weights
    }

    /// Main entry point: produce a ranked recommendation list for one
    /// shopper.
    pub fn recommend(&self, req: &RecommendRequest) -> Result<RecommendResponse, RecommendError> {
        let start = Instant::now();
        req.weights.validate()?;

        info!(
            "Recommending: user={}, history={}, pool={}, n={}",
            req.user_id,
            req.user_history.len(),
            req.candidate_pool_size,
            req.result_size
        );

        // Step 1: candidate pool from the collaborative signal,
        // excluding everything already in the user's history
        let excluded: HashSet<ProductId> = req.user_history.iter().copied().collect();
        let candidates = generate_candidates(
            self.cf.as_ref(),
            &self.catalog,
            req.user_id,
            &excluded,
            req.candidate_pool_size,
        );
        let candidates_scored = candidates.len();

        // Step 2: content affinity against recent history
        let content_raw = content_affinity(self.sim.as_ref(), &candidates, &req.user_history);

        // Step 3: normalize each signal column independently
        let cf_raw: Vec<f32> = candidates.iter().map(|&(_, s)| s).collect();
        let cf_norms = min_max_normalize(&cf_raw);
        let content_norms = normalize_content_column(&content_raw);

        // Step 4: hybrid combination, sort, truncate
        let scored: Vec<ScoredCandidate> = candidates
            .iter()
            .enumerate()
            .map(|(i, &(product_id, cf_score))| ScoredCandidate {
                product_id,
                cf_score,
                content_score: content_raw[i],
                cf_score_norm: cf_norms[i],
                content_score_norm: content_norms[i],
                hybrid_score: hybrid_score(cf_norms[i], content_norms[i], &req.weights),
            })
            .collect();
        let ranked = rank_candidates(scored, req.result_size);

        // Step 5: join with catalog attributes, optional per-item rationale
        let rationale = if req.explain {
            Some(
                ranked
                    .iter()
                    .map(|c| self.explain(req.user_id, c.product_id, &req.user_history))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        } else {
            None
        };
        let items = to_items(&ranked, &self.catalog);

        let stats = RecommendStats {
            catalog_products: self.catalog.len(),
            candidates_scored,
            generation_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Recommendation complete: {} items from {} candidates in {}ms",
            items.len(),
            candidates_scored,
            stats.generation_time_ms
        );

        Ok(RecommendResponse {
            items,
            stats,
            rationale,
        })
    }

    /// Explain one recommended item. Fails with
    /// [`RecommendError::ProductNotFound`] for an id outside the catalog.
    pub fn explain(
        &self,
        user_id: UserId,
        product_id: ProductId,
        history: &[ProductId],
    ) -> Result<String, RecommendError> {
        explain_recommendation(self.cf.as_ref(), &self.catalog, user_id, product_id, history)
    }
}
