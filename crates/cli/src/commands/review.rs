//! Product reviews.

use tracing::info;

use tanish_arts_core::ProductId;
use tanish_arts_storefront::{DurableStore, Storefront, models::Review};

/// Review `product`, signed by `author` or else the current user.
///
/// Reviews are kept for this invocation only; the catalog is not persisted.
pub fn add<S: DurableStore>(
    storefront: &mut Storefront<S>,
    product: ProductId,
    rating: u8,
    comment: String,
    author: Option<String>,
) {
    let author = author
        .or_else(|| {
            storefront
                .current_user()
                .map(|user| user.username.to_string())
        })
        .unwrap_or_else(|| "Anonymous".to_string());

    if let Ok(false) = storefront.add_review(product, Review::new(author, rating, comment)) {
        info!(%product, "No such product");
    }
    if let Some(rating) = storefront
        .catalog()
        .get(product)
        .and_then(tanish_arts_storefront::models::Product::average_rating)
    {
        info!(%product, "Average rating: {rating:.1}");
    }
}
