//! Oracle adapters wrapping the two trained models.
//!
//! The hybrid engine never sees model internals; it only calls these two
//! capability traits. Any matrix-factorization or vector-similarity
//! implementation can be substituted behind the same contract.

use crate::error::OracleMiss;
use crate::types::{ProductId, UserId};
use std::collections::{HashMap, HashSet};

/// Collaborative-filtering model oracle.
///
/// Returns an unbounded real estimate, higher = stronger affinity.
/// Pure from the engine's viewpoint; called up to once per (user,
/// candidate) pair per request.
pub trait CollaborativeOracle: Send + Sync {
    fn predict(&self, user: UserId, product: ProductId) -> Result<f32, OracleMiss>;
}

/// Content-similarity model oracle.
///
/// Returns a value in [0,1], symmetric, with `similarity(p, p) = 1` by
/// convention of the underlying vector space. Called up to
/// `RECENCY_WINDOW` times per candidate per request.
pub trait SimilarityOracle: Send + Sync {
    fn similarity(&self, a: ProductId, b: ProductId) -> Result<f32, OracleMiss>;
}

/// Table-backed collaborative oracle for tests
pub struct TableCfOracle {
    scores: HashMap<(UserId, ProductId), f32>,
}

impl TableCfOracle {
    pub fn new(scores: HashMap<(UserId, ProductId), f32>) -> Self {
        Self { scores }
    }

    pub fn from_pairs(pairs: &[(UserId, ProductId, f32)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|&(u, p, s)| ((u, p), s))
                .collect(),
        )
    }
}

impl CollaborativeOracle for TableCfOracle {
    fn predict(&self, user: UserId, product: ProductId) -> Result<f32, OracleMiss> {
        self.scores.get(&(user, product)).copied().ok_or(OracleMiss)
    }
}

/// Popularity-prior collaborative oracle: predicts the product's global
/// popularity for every user. Used by the demo catalog and as a
/// cold-start fallback when no per-user model is available.
pub struct PopularityCfOracle {
    popularity: HashMap<ProductId, f32>,
}

impl PopularityCfOracle {
    pub fn new(popularity: HashMap<ProductId, f32>) -> Self {
        Self { popularity }
    }
}

impl CollaborativeOracle for PopularityCfOracle {
    fn predict(&self, _user: UserId, product: ProductId) -> Result<f32, OracleMiss> {
        self.popularity.get(&product).copied().ok_or(OracleMiss)
    }
}

/// Table-backed similarity oracle for tests and the demo catalog.
/// Pairs are stored once and looked up in either order.
pub struct TableSimilarityOracle {
    pairs: HashMap<(ProductId, ProductId), f32>,
    known: HashSet<ProductId>,
}

impl TableSimilarityOracle {
    pub fn new() -> Self {
        Self {
            pairs: HashMap::new(),
            known: HashSet::new(),
        }
    }

    /// Register `ids` as known to the oracle without asserting any
    /// similarity between them (their pairwise similarity reads as 0).
    pub fn with_known(mut self, ids: &[ProductId]) -> Self {
        self.known.extend(ids.iter().copied());
        self
    }

    pub fn set(&mut self, a: ProductId, b: ProductId, sim: f32) {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.pairs.insert(key, sim);
        self.known.insert(a);
        self.known.insert(b);
    }
}

impl Default for TableSimilarityOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityOracle for TableSimilarityOracle {
    fn similarity(&self, a: ProductId, b: ProductId) -> Result<f32, OracleMiss> {
        if !self.known.contains(&a) || !self.known.contains(&b) {
            return Err(OracleMiss);
        }
        if a == b {
            return Ok(1.0);
        }
        let key = if a <= b { (a, b) } else { (b, a) };
        Ok(self.pairs.get(&key).copied().unwrap_or(0.0))
    }
}
