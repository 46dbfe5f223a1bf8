//! Cart contents.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use tanish_arts_core::{Price, ProductId};

use super::catalog::Catalog;

/// Mapping from product to quantity.
///
/// A product that is not in the map has quantity zero. Quantities are
/// `NonZeroU32`, so an entry can never hold zero; taking an item out removes
/// its entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(BTreeMap<ProductId, NonZeroU32>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add one unit of `product`. Returns the new quantity.
    pub fn add(&mut self, product: ProductId) -> u32 {
        let quantity = self
            .0
            .entry(product)
            .and_modify(|q| *q = q.saturating_add(1))
            .or_insert(NonZeroU32::MIN);
        quantity.get()
    }

    /// Take `product` out of the cart entirely. Returns `false` if absent.
    pub fn remove(&mut self, product: ProductId) -> bool {
        self.0.remove(&product).is_some()
    }

    /// Replace the whole cart with one unit of `product`.
    pub fn replace_with(&mut self, product: ProductId) {
        self.0.clear();
        self.0.insert(product, NonZeroU32::MIN);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Quantity of `product`, zero if absent.
    #[must_use]
    pub fn quantity(&self, product: ProductId) -> u32 {
        self.0.get(&product).map_or(0, |q| q.get())
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.0.values().map(|q| u64::from(q.get())).sum()
    }

    /// Lines as `(product, quantity)` in product id order.
    pub fn lines(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.0.iter().map(|(id, q)| (*id, q.get()))
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total price of the lines whose product is in `catalog`.
    ///
    /// Lines for unknown products are skipped. Returns `None` if the priced
    /// lines use more than one currency.
    #[must_use]
    pub fn subtotal(&self, catalog: &Catalog) -> Option<Price> {
        let mut priced = self.lines().filter_map(|(id, quantity)| {
            catalog.get(id).map(|product| product.price.times(quantity))
        });

        let Some(first) = priced.next() else {
            return Some(Price::zero(Default::default()));
        };
        priced.try_fold(first, Price::checked_add)
    }
}
