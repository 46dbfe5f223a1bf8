//! Product catalog.
//!
//! The catalog is supplied from outside the storefront (a bundled list or a
//! JSON file). Appending reviews is the only mutation the storefront makes,
//! and reviews are not persisted.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tanish_arts_core::{Price, ProductId};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Mean review rating, or `None` without reviews.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)] // Review counts stay far below f64 precision
        let count = self.reviews.len() as f64;
        Some(f64::from(total) / count)
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author: String,
    /// Star rating, see [`Review::RATING_RANGE`].
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Accepted star ratings.
    pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

    /// A review written now.
    #[must_use]
    pub fn new(author: impl Into<String>, rating: u8, comment: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            rating,
            comment: comment.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether the rating is within [`Review::RATING_RANGE`].
    #[must_use]
    pub fn has_valid_rating(&self) -> bool {
        Self::RATING_RANGE.contains(&self.rating)
    }
}

/// The fixed list of products, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the document is not a product array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products whose category matches `category`, ignoring ASCII case.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |p| p.category.eq_ignore_ascii_case(category))
    }

    /// Append `review` to the product's reviews.
    ///
    /// Returns `false`, leaving the catalog untouched, if no product has `id`.
    pub fn add_review(&mut self, id: ProductId, review: Review) -> bool {
        match self.products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.reviews.push(review);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
