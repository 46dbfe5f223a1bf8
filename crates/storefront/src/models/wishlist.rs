//! Wishlist membership.

use serde::{Deserialize, Serialize};

use tanish_arts_core::ProductId;

/// Set of wished-for products, kept in the order they were added.
///
/// Order is for display only; membership is what matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist(Vec<ProductId>);

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a wishlist from stored ids, dropping repeats.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut wishlist = Self::new();
        for id in ids {
            wishlist.insert(id);
        }
        wishlist
    }

    /// Add `product`. Returns `false` if it was already present.
    pub fn insert(&mut self, product: ProductId) -> bool {
        if self.contains(product) {
            return false;
        }
        self.0.push(product);
        true
    }

    /// Remove `product`. Returns `false` if it was not present.
    pub fn remove(&mut self, product: ProductId) -> bool {
        let before = self.0.len();
        self.0.retain(|id| *id != product);
        self.0.len() != before
    }

    #[must_use]
    pub fn contains(&self, product: ProductId) -> bool {
        self.0.contains(&product)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Product ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.0.iter().copied()
    }
}
