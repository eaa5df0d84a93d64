//! HTTP serving layer for the recommendation engine

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::engine::SharedEngine;
use crate::error::RecommendError;
use crate::types::{
    HybridWeights, ProductId, RecommendRequest, RecommendResponse, UserId, DEFAULT_POOL_SIZE,
    DEFAULT_RESULT_SIZE,
};

/// HTTP request body for `/recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendRequestHttp {
    pub user_id: UserId,
    /// Most-recent-last purchase history / current cart contents
    #[serde(default)]
    pub user_history: Vec<ProductId>,
    pub candidate_pool_size: Option<usize>,
    pub result_size: Option<usize>,
    pub cf_weight: Option<f32>,
    pub content_weight: Option<f32>,
    pub explain: Option<bool>,
}

/// HTTP request body for `/explain`
#[derive(Debug, Deserialize)]
pub struct ExplainRequestHttp {
    pub user_id: UserId,
    pub product_id: ProductId,
    #[serde(default)]
    pub user_history: Vec<ProductId>,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub product_id: ProductId,
    pub explanation: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub catalog_products: usize,
}

fn error_status(err: &RecommendError) -> StatusCode {
    match err {
        RecommendError::ProductNotFound(_) => StatusCode::NOT_FOUND,
        RecommendError::InvalidWeights { .. } => StatusCode::BAD_REQUEST,
    }
}

fn error_body(err: &RecommendError) -> (StatusCode, Json<ErrorResponse>) {
    (
        error_status(err),
        Json(ErrorResponse {
            error: err.to_string(),
            details: None,
        }),
    )
}

/// Recommendation handler
pub(crate) async fn recommend_handler(
    State(engine): State<SharedEngine>,
    Json(req): Json<RecommendRequestHttp>,
) -> Result<Json<RecommendResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        "Received recommend request: user={}, history={}, pool={:?}, n={:?}",
        req.user_id,
        req.user_history.len(),
        req.candidate_pool_size,
        req.result_size
    );

    let defaults = engine.default_weights();
    let weights = HybridWeights {
        cf: req.cf_weight.unwrap_or(defaults.cf),
        content: req.content_weight.unwrap_or(defaults.content),
    };

    let request = RecommendRequest {
        user_id: req.user_id,
        user_history: req.user_history,
        candidate_pool_size: req.candidate_pool_size.unwrap_or(DEFAULT_POOL_SIZE),
        result_size: req.result_size.unwrap_or(DEFAULT_RESULT_SIZE),
        weights,
        explain: req.explain.unwrap_or(false),
    };

    match engine.recommend(&request) {
        Ok(response) => {
            info!(
                "Recommendation successful: {} items in {}ms",
                response.items.len(),
                response.stats.generation_time_ms
            );
            Ok(Json(response))
        }
        Err(e) => {
            error!("Recommendation failed: {}", e);
            Err(error_body(&e))
        }
    }
}

/// Explanation handler
pub(crate) async fn explain_handler(
    State(engine): State<SharedEngine>,
    Json(req): Json<ExplainRequestHttp>,
) -> Result<Json<ExplainResponse>, (StatusCode, Json<ErrorResponse>)> {
    match engine.explain(req.user_id, req.product_id, &req.user_history) {
        Ok(explanation) => Ok(Json(ExplainResponse {
            product_id: req.product_id,
            explanation,
        })),
        Err(e) => {
            error!("Explanation failed: {}", e);
            Err(error_body(&e))
        }
    }
}

/// Health check handler
pub(crate) async fn health_handler(State(engine): State<SharedEngine>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "smartgrocer".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_products: engine.catalog().len(),
    })
}

/// Create and configure the HTTP server
pub fn create_router(engine: SharedEngine) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/recommend", post(recommend_handler))
        .route("/explain", post(explain_handler))
        .with_state(engine)
}

/// Run the HTTP server
pub async fn run_server(engine: SharedEngine, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting SmartGrocer server on {}", addr);

    let app = create_router(engine);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
