//! SmartGrocer HTTP server binary

use smartgrocer::artifacts;
use smartgrocer::oracles::{PopularityCfOracle, TableSimilarityOracle};
use smartgrocer::server;
use smartgrocer::{Catalog, HybridWeights, Product, RecommenderEngine, SharedEngine};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    println!("SmartGrocer Hybrid Recommender");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    // Check for --demo flag
    let demo = std::env::args().any(|arg| arg == "--demo");

    let engine = if demo {
        println!("Mode: DEMO catalog (built-in data, no artifacts needed)");
        demo_engine()
    } else {
        let models_dir = std::env::var("GROCER_MODELS_DIR").unwrap_or_else(|_| "./models".to_string());
        println!("Mode: trained artifacts");
        println!("Models dir: {}", models_dir);
        println!("   (use --demo to run without exported models)");

        let bundle = artifacts::load_bundle(&PathBuf::from(&models_dir))?;

        println!("Catalog: {} products", bundle.catalog.len());
        println!(
            "Model: version {} trained {}",
            bundle.metadata.model_version, bundle.metadata.train_date
        );

        let weights = HybridWeights {
            cf: bundle.metadata.cf_weight,
            content: bundle.metadata.content_weight,
        };
        RecommenderEngine::new(
            Arc::new(bundle.catalog),
            Arc::new(bundle.cf_model),
            Arc::new(bundle.similarity),
            weights,
        )
    };

    let port: u16 = std::env::var("GROCER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    println!("Engine initialized");
    println!("Starting HTTP server on port {}...", port);
    println!();

    server::run_server(engine, port).await?;

    Ok(())
}

/// Small built-in catalog with a popularity prior and hand-set
/// similarities, enough to exercise every endpoint without trained
/// artifacts.
fn demo_engine() -> SharedEngine {
    let product = |id: u32, name: &str, aisle: &str, department: &str| Product {
        product_id: id,
        product_name: name.to_string(),
        aisle: aisle.to_string(),
        department: department.to_string(),
    };

    let catalog = Catalog::new(vec![
        product(1, "Banana", "fresh fruits", "produce"),
        product(2, "Organic Strawberries", "fresh fruits", "produce"),
        product(3, "Organic Baby Spinach", "packaged vegetables fruits", "produce"),
        product(4, "Whole Milk", "milk", "dairy eggs"),
        product(5, "Organic Greek Yogurt", "yogurt", "dairy eggs"),
        product(6, "Large Brown Eggs", "eggs", "dairy eggs"),
        product(7, "Sourdough Bread", "bread", "bakery"),
        product(8, "Everything Bagels", "bread", "bakery"),
        product(9, "Sparkling Water", "water seltzer sparkling water", "beverages"),
        product(10, "Cold Brew Coffee", "coffee", "beverages"),
        product(11, "Tortilla Chips", "chips pretzels", "snacks"),
        product(12, "Mild Salsa", "dips spreads", "snacks"),
    ]);

    let popularity: HashMap<u32, f32> = [
        (1, 9.2),
        (2, 7.8),
        (3, 6.5),
        (4, 8.9),
        (5, 6.1),
        (6, 7.4),
        (7, 5.8),
        (8, 4.3),
        (9, 5.1),
        (10, 4.9),
        (11, 3.7),
        (12, 3.2),
    ]
    .into_iter()
    .collect();

    let mut sim = TableSimilarityOracle::new().with_known(&(1..=12).collect::<Vec<_>>());
    // Same aisle or department reads as similar; cross-category pairings
    // that co-occur in carts get a small bump.
    sim.set(1, 2, 0.74);
    sim.set(1, 3, 0.41);
    sim.set(2, 3, 0.52);
    sim.set(4, 5, 0.63);
    sim.set(4, 6, 0.48);
    sim.set(5, 6, 0.39);
    sim.set(7, 8, 0.81);
    sim.set(9, 10, 0.36);
    sim.set(11, 12, 0.69);
    sim.set(2, 5, 0.22);
    sim.set(7, 6, 0.18);

    RecommenderEngine::new(
        Arc::new(catalog),
        Arc::new(PopularityCfOracle::new(popularity)),
        Arc::new(sim),
        HybridWeights::default(),
    )
}
