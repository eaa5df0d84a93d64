//! Core type definitions for hybrid grocery recommendation

use serde::{Deserialize, Serialize};

use crate::error::RecommendError;

/// Catalog product key (Instacart-style integer id)
pub type ProductId = u32;
/// Shopper key
pub type UserId = u32;

/// Default size of the collaborative candidate pool
pub const DEFAULT_POOL_SIZE: usize = 50;
/// Default number of returned recommendations
pub const DEFAULT_RESULT_SIZE: usize = 10;
/// Number of most recent history entries considered for content affinity
pub const RECENCY_WINDOW: usize = 5;

/// Immutable catalog entry, loaded once at process start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    pub aisle: String,
    pub department: String,
}

/// Relative weight of each signal in the hybrid score.
///
/// Any non-negative pair is accepted; the pair is recommended (but not
/// required) to sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HybridWeights {
    pub cf: f32,
    pub content: f32,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            cf: 0.6,
            content: 0.4,
        }
    }
}

impl HybridWeights {
    pub fn validate(&self) -> Result<(), RecommendError> {
        // NaN fails every comparison, so check finiteness explicitly
        if !self.cf.is_finite()
            || !self.content.is_finite()
            || self.cf < 0.0
            || self.content < 0.0
        {
            return Err(RecommendError::InvalidWeights {
                cf: self.cf,
                content: self.content,
            });
        }
        Ok(())
    }
}

/// Request to compute recommendations for one shopper
#[derive(Debug, Clone)]
pub struct RecommendRequest {
    pub user_id: UserId,
    /// Previously acquired products, most-recent-last. Also the excluded set:
    /// nothing in here is ever recommended back.
    pub user_history: Vec<ProductId>,
    pub candidate_pool_size: usize,
    pub result_size: usize,
    pub weights: HybridWeights,
    pub explain: bool,
}

impl RecommendRequest {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            user_history: vec![],
            candidate_pool_size: DEFAULT_POOL_SIZE,
            result_size: DEFAULT_RESULT_SIZE,
            weights: HybridWeights::default(),
            explain: false,
        }
    }
}

/// Per-candidate working record; exists only for the duration of one request
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub product_id: ProductId,
    pub cf_score: f32,
    pub content_score: f32,
    pub cf_score_norm: f32,
    pub content_score_norm: f32,
    pub hybrid_score: f32,
}

/// One row of the final ranking, joined with catalog attributes
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedItem {
    pub rank: usize,
    pub product_id: ProductId,
    pub product_name: String,
    pub department: String,
    pub aisle: String,
    pub hybrid_score: f32,
}

/// Response from one recommendation request
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub items: Vec<RecommendedItem>,
    pub stats: RecommendStats,
    /// Per-item explanation strings, same order as `items`
    pub rationale: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct RecommendStats {
    pub catalog_products: usize,
    pub candidates_scored: usize,
    pub generation_time_ms: u64,
}
