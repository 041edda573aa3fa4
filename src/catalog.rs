//! Catalog
//!
//! The catalog is the source of unit prices. Pricing only ever asks it one
//! question, so any store can take part by implementing [`Catalog`].

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};

use crate::products::Product;

/// Resolves products to their current unit price.
pub trait Catalog<'a> {
    /// Return the unit price of `product`, or `None` if the catalog does not know it.
    fn unit_price(&self, product: &Product) -> Option<Money<'a, Currency>>;
}

/// A catalog held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog<'a> {
    prices: FxHashMap<Product, Money<'a, Currency>>,
}

impl<'a> InMemoryCatalog<'a> {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            prices: FxHashMap::default(),
        }
    }

    /// Add a product, returning the price it replaced if it was already listed.
    pub fn add_product(
        &mut self,
        product: Product,
        price: Money<'a, Currency>,
    ) -> Option<Money<'a, Currency>> {
        self.prices.insert(product, price)
    }

    /// Number of listed products.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Check if the catalog lists no products.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<'a> Catalog<'a> for InMemoryCatalog<'a> {
    fn unit_price(&self, product: &Product) -> Option<Money<'a, Currency>> {
        self.prices.get(product).copied()
    }
}
