//! Human-readable justification for one recommended item

use crate::catalog::Catalog;
use crate::error::RecommendError;
use crate::oracles::CollaborativeOracle;
use crate::types::{ProductId, UserId};

/// Build a multi-line explanation for recommending `product_id` to
/// `user_id`.
///
/// The collaborative estimate is recomputed fresh and reported verbatim
/// (an oracle miss reads as 0, per the zero-contribution rule). When the
/// history is non-empty the single most recent purchase is named as a
/// basis of similarity; this is narrative framing, no similarity value is
/// recomputed or asserted for it.
///
/// Fails with [`RecommendError::ProductNotFound`] when `product_id` is
/// absent from the catalog.
pub fn explain_recommendation(
    cf: &dyn CollaborativeOracle,
    catalog: &Catalog,
    user_id: UserId,
    product_id: ProductId,
    history: &[ProductId],
) -> Result<String, RecommendError> {
    let product = catalog
        .get(product_id)
        .ok_or(RecommendError::ProductNotFound(product_id))?;

    let mut text = format!("Product: {}\n\n", product.product_name);

    let est = cf.predict(user_id, product_id).unwrap_or(0.0);
    text.push_str(&format!("Similar users often buy this (Score: {est:.2})\n"));

    if let Some(&recent) = history.last() {
        // A recent purchase no longer in the catalog is simply not named.
        if let Some(recent_product) = catalog.get(recent) {
            text.push_str(&format!(
                "Similar to your recent purchase: {}\n",
                recent_product.product_name
            ));
        }
    }

    Ok(text)
}
