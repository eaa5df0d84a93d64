//! Error types for the recommendation core

use crate::types::ProductId;
use thiserror::Error;

/// Signalled by an oracle when it does not know an id.
///
/// Always recovered locally: the affected candidate gets a zero
/// contribution (or the history item is skipped) and the request
/// continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("id unknown to oracle")]
pub struct OracleMiss;

/// Request-level failures surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    #[error("product {0} not found in catalog")]
    ProductNotFound(ProductId),

    #[error("weights must be finite and non-negative (cf={cf}, content={content})")]
    InvalidWeights { cf: f32, content: f32 },
}
