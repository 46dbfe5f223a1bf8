//! Wishlist commands.

use tracing::info;

use tanish_arts_core::ProductId;
use tanish_arts_storefront::{DurableStore, Storefront};

use super::cart::report_refusal;

pub fn add<S: DurableStore>(storefront: &mut Storefront<S>, product: ProductId) {
    if let Err(e) = storefront.add_to_wishlist(product) {
        report_refusal(&e);
    }
}

pub fn remove<S: DurableStore>(storefront: &mut Storefront<S>, product: ProductId) {
    if !storefront.remove_from_wishlist(product) {
        info!(%product, "Not in wishlist");
    }
}

pub fn show<S: DurableStore>(storefront: &Storefront<S>) {
    if storefront.wishlist().is_empty() {
        info!("Wishlist is empty");
        return;
    }
    for product in storefront.wishlist().iter() {
        let name = storefront
            .catalog()
            .get(product)
            .map_or_else(|| format!("Item #{product}"), |p| p.name.clone());
        info!("#{product} {name}");
    }
}
