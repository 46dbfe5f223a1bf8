//! Cart commands.

use tracing::info;

use tanish_arts_core::ProductId;
use tanish_arts_storefront::{CommerceError, DurableStore, Storefront};

use super::report_navigation;

pub fn add<S: DurableStore>(storefront: &mut Storefront<S>, product: ProductId) {
    if let Err(e) = storefront.add_to_cart(product) {
        report_refusal(&e);
    }
}

pub fn remove<S: DurableStore>(storefront: &mut Storefront<S>, product: ProductId) {
    if !storefront.remove_from_cart(product) {
        info!(%product, "Not in cart");
    }
}

pub fn buy_now<S: DurableStore>(storefront: &mut Storefront<S>, product: ProductId) {
    match storefront.buy_now(product) {
        Ok(intent) => report_navigation(intent),
        Err(e) => report_refusal(&e),
    }
}

pub fn checkout<S: DurableStore>(storefront: &mut Storefront<S>) {
    match storefront.place_order() {
        Ok(intent) => report_navigation(intent),
        Err(e) => report_refusal(&e),
    }
}

/// List cart lines with their catalog names and the subtotal.
pub fn show<S: DurableStore>(storefront: &Storefront<S>) {
    let cart = storefront.cart();
    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }

    for (product, quantity) in cart.lines() {
        match storefront.catalog().get(product) {
            Some(p) => info!("{quantity} x {} (#{product}) @ {}", p.name, p.price),
            None => info!("{quantity} x Item #{product}"),
        }
    }
    match storefront.cart_subtotal() {
        Some(subtotal) => info!(items = storefront.cart_item_count(), "Subtotal: {subtotal}"),
        None => info!(
            items = storefront.cart_item_count(),
            "Subtotal unavailable (mixed currencies)"
        ),
    }
}

/// Log where a refused command sends the user.
pub(super) fn report_refusal(error: &CommerceError) {
    if let Some(intent) = error.navigation() {
        report_navigation(intent);
    }
}
