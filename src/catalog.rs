//! Read-only product catalog

use crate::types::{Product, ProductId};
use std::collections::HashMap;

/// The full product table, loaded once and immutable for the process
/// lifetime. Products are kept sorted by id so every catalog scan is
/// deterministic.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new(mut products: Vec<Product>) -> Self {
        products.sort_by_key(|p| p.product_id);
        products.dedup_by_key(|p| p.product_id);
        let index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.product_id, i))
            .collect();
        Self { products, index }
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&i| &self.products[i])
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    /// All product ids, ascending
    pub fn ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.products.iter().map(|p| p.product_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn in_department<'a>(&'a self, department: &str) -> Vec<&'a Product> {
        self.products
            .iter()
            .filter(|p| p.department == department)
            .collect()
    }

    pub fn in_aisle<'a>(&'a self, aisle: &str) -> Vec<&'a Product> {
        self.products.iter().filter(|p| p.aisle == aisle).collect()
    }
}
