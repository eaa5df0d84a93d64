//! Model artifacts consumed at process start.
//!
//! The training pipeline exports four files into a models directory:
//! the catalog table (`products.csv`), a latent-factor collaborative
//! model (`cf_model.json`), a sparse product-similarity matrix
//! (`similarity_matrix.json`) and training metadata
//! (`model_metadata.json`). Everything here is load-once, read-many;
//! shutdown is a no-op.

use crate::catalog::Catalog;
use crate::error::OracleMiss;
use crate::oracles::{CollaborativeOracle, SimilarityOracle};
use crate::types::{Product, ProductId, UserId};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub const CATALOG_FILE: &str = "products.csv";
pub const CF_MODEL_FILE: &str = "cf_model.json";
pub const SIMILARITY_FILE: &str = "similarity_matrix.json";
pub const METADATA_FILE: &str = "model_metadata.json";

/// Metadata written by the training job
#[derive(Debug, Clone, Deserialize)]
pub struct ModelMetadata {
    pub train_date: String,
    pub model_version: String,
    pub n_products: usize,
    pub cf_weight: f32,
    pub content_weight: f32,
}

/// Serialized latent-factor collaborative model.
///
/// `predict = global_mean + user_bias + item_bias + user_factors · item_factors`,
/// clamped to the training rating scale. An unknown product is an oracle
/// miss; an unknown user falls back to the mean plus item bias
/// (cold-start).
#[derive(Debug, Deserialize)]
pub struct FactorModel {
    pub global_mean: f32,
    pub rating_min: f32,
    pub rating_max: f32,
    #[serde(default)]
    pub user_bias: HashMap<UserId, f32>,
    #[serde(default)]
    pub item_bias: HashMap<ProductId, f32>,
    #[serde(default)]
    pub user_factors: HashMap<UserId, Vec<f32>>,
    #[serde(default)]
    pub item_factors: HashMap<ProductId, Vec<f32>>,
}

impl CollaborativeOracle for FactorModel {
    fn predict(&self, user: UserId, product: ProductId) -> Result<f32, OracleMiss> {
        let item_factors = self.item_factors.get(&product).ok_or(OracleMiss)?;
        let item_bias = self.item_bias.get(&product).copied().unwrap_or(0.0);

        let mut est = self.global_mean + item_bias;
        if let Some(user_bias) = self.user_bias.get(&user) {
            est += user_bias;
        }
        if let Some(user_factors) = self.user_factors.get(&user) {
            est += user_factors
                .iter()
                .zip(item_factors.iter())
                .map(|(p, q)| p * q)
                .sum::<f32>();
        }

        Ok(est.clamp(self.rating_min, self.rating_max))
    }
}

/// Serialized sparse similarity matrix: one row of `(product, sim)`
/// entries per product the vectorizer saw. Entries absent from a known
/// row are sparse zeros; a row absent entirely is an oracle miss.
#[derive(Debug, Deserialize)]
pub struct SimilarityMatrix {
    rows: HashMap<ProductId, Vec<(ProductId, f32)>>,
}

impl SimilarityMatrix {
    pub fn new(rows: HashMap<ProductId, Vec<(ProductId, f32)>>) -> Self {
        Self { rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
}

impl SimilarityOracle for SimilarityMatrix {
    fn similarity(&self, a: ProductId, b: ProductId) -> Result<f32, OracleMiss> {
        let row = self.rows.get(&a).ok_or(OracleMiss)?;
        if !self.rows.contains_key(&b) {
            return Err(OracleMiss);
        }
        if a == b {
            return Ok(1.0);
        }
        Ok(row
            .iter()
            .find(|&&(id, _)| id == b)
            .map(|&(_, sim)| sim)
            .unwrap_or(0.0))
    }
}

/// Everything the serving layer needs, loaded in one pass
pub struct ModelBundle {
    pub catalog: Catalog,
    pub cf_model: FactorModel,
    pub similarity: SimilarityMatrix,
    pub metadata: ModelMetadata,
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening catalog {}", path.display()))?;

    let mut products: Vec<Product> = Vec::new();
    for row in reader.deserialize() {
        let product: Product =
            row.with_context(|| format!("parsing catalog row in {}", path.display()))?;
        products.push(product);
    }

    Ok(Catalog::new(products))
}

pub fn load_cf_model(path: &Path) -> Result<FactorModel> {
    let file =
        File::open(path).with_context(|| format!("opening cf model {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing cf model {}", path.display()))
}

pub fn load_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let file = File::open(path)
        .with_context(|| format!("opening similarity matrix {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing similarity matrix {}", path.display()))
}

pub fn load_metadata(path: &Path) -> Result<ModelMetadata> {
    let file =
        File::open(path).with_context(|| format!("opening metadata {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing metadata {}", path.display()))
}

/// Load all four artifacts from `dir`
pub fn load_bundle(dir: &Path) -> Result<ModelBundle> {
    let catalog = load_catalog(&dir.join(CATALOG_FILE))?;
    let cf_model = load_cf_model(&dir.join(CF_MODEL_FILE))?;
    let similarity = load_similarity(&dir.join(SIMILARITY_FILE))?;
    let metadata = load_metadata(&dir.join(METADATA_FILE))?;

    info!(
        "Loaded model bundle from {}: {} products, {} similarity rows, version {} ({})",
        dir.display(),
        catalog.len(),
        similarity.n_rows(),
        metadata.model_version,
        metadata.train_date
    );

    Ok(ModelBundle {
        catalog,
        cf_model,
        similarity,
        metadata,
    })
}
