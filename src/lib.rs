//! SmartGrocer - Hybrid Grocery Recommender
//!
//! Blends two signal sources into one ranked recommendation list:
//! - Collaborative filtering (candidate generation over the catalog)
//! - Content similarity against recent purchase history
//! - Per-request min-max normalization of both signal columns
//! - Weighted hybrid ranking with deterministic tie-breaks
//! - Per-item human-readable explanations

pub mod types;
pub mod error;
pub mod catalog;
pub mod oracles;
pub mod artifacts;
pub mod candidates;
pub mod affinity;
pub mod scoring;
pub mod ranking;
pub mod explain;
pub mod engine;
pub mod server;

pub use types::*;
pub use error::{OracleMiss, RecommendError};
pub use catalog::Catalog;
pub use oracles::{
    CollaborativeOracle, PopularityCfOracle, SimilarityOracle, TableCfOracle,
    TableSimilarityOracle,
};
pub use artifacts::{FactorModel, ModelBundle, ModelMetadata, SimilarityMatrix};
pub use engine::{RecommenderEngine, SharedEngine};
