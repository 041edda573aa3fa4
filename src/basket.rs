//! Basket
//!
//! The shopping cart. Additions are kept in the order they were made; the
//! per-product totals used for offer evaluation are always derived from them.
//! A running total per product is kept alongside so additions can be checked
//! for overflow without rescanning the basket.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    catalog::Catalog,
    checkout::PricingError,
    discounts::calculate_discount,
    offers::Offers,
    products::Product,
    receipt::Receipt,
};

/// Errors related to basket construction.
#[derive(Debug, Error, PartialEq)]
pub enum BasketError {
    /// Quantities added to the basket must be greater than zero (product name, quantity).
    #[error("invalid quantity {1} for {0}; quantity must be greater than zero")]
    InvalidQuantity(String, Decimal),

    /// The product's total quantity would no longer be representable (product name).
    #[error("total quantity of {0} overflowed")]
    QuantityOverflow(String),
}

/// A quantity of a product, as added to the basket.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuantity {
    product: Product,
    quantity: Decimal,
}

impl ProductQuantity {
    /// Create a new product quantity.
    pub fn new(product: Product, quantity: Decimal) -> Self {
        Self { product, quantity }
    }

    /// The product
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The quantity added
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }
}

/// Basket
#[derive(Debug, Default, Clone)]
pub struct Basket {
    items: Vec<ProductQuantity>,
    totals: FxHashMap<Product, Decimal>,
}

impl Basket {
    /// Create a new, empty basket.
    pub fn new() -> Self {
        Basket {
            items: Vec::new(),
            totals: FxHashMap::default(),
        }
    }

    /// Add a single unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::QuantityOverflow`] if the product's total quantity overflows.
    pub fn add_item(&mut self, product: Product) -> Result<(), BasketError> {
        self.add_item_quantity(product, Decimal::ONE)
    }

    /// Add `quantity` of `product`. The basket is left unchanged on error.
    ///
    /// # Errors
    ///
    /// - [`BasketError::InvalidQuantity`]: `quantity` is zero or negative.
    /// - [`BasketError::QuantityOverflow`]: the product's total quantity overflows.
    pub fn add_item_quantity(
        &mut self,
        product: Product,
        quantity: Decimal,
    ) -> Result<(), BasketError> {
        if quantity <= Decimal::ZERO {
            return Err(BasketError::InvalidQuantity(
                product.name().to_string(),
                quantity,
            ));
        }

        let total = self
            .quantity_of(&product)
            .checked_add(quantity)
            .ok_or_else(|| BasketError::QuantityOverflow(product.name().to_string()))?;

        self.totals.insert(product.clone(), total);
        self.items.push(ProductQuantity::new(product, quantity));

        Ok(())
    }

    /// Items in the order they were added, one entry per addition.
    pub fn items(&self) -> &[ProductQuantity] {
        &self.items
    }

    /// Total quantity of each product, in the order products were first added.
    pub fn quantities(&self) -> Vec<(&Product, Decimal)> {
        let mut positions: FxHashMap<&Product, usize> = FxHashMap::default();
        let mut totals: Vec<(&Product, Decimal)> = Vec::new();

        for item in &self.items {
            if let Some(total) = positions
                .get(&item.product)
                .and_then(|&position| totals.get_mut(position))
            {
                total.1 += item.quantity;
            } else {
                positions.insert(&item.product, totals.len());
                totals.push((&item.product, item.quantity));
            }
        }

        totals
    }

    /// Total quantity of `product` across all additions.
    pub fn quantity_of(&self, product: &Product) -> Decimal {
        self.totals.get(product).copied().unwrap_or_default()
    }

    /// Apply the registered offers to the basket, adding any discounts to `receipt`.
    ///
    /// Products without an offer are left alone. At most one discount is added per product.
    ///
    /// # Errors
    ///
    /// - [`PricingError::UnknownProduct`]: the catalog has no price for a product with an offer.
    /// - [`PricingError::Discount`]: the discount could not be calculated.
    pub fn handle_offers<'a>(
        &self,
        receipt: &mut Receipt<'a>,
        offers: &Offers<'a>,
        catalog: &impl Catalog<'a>,
    ) -> Result<(), PricingError> {
        for (product, quantity) in self.quantities() {
            if quantity.is_zero() {
                continue;
            }

            let Some(offer) = offers.lookup(product) else {
                continue;
            };

            let unit_price = catalog
                .unit_price(product)
                .ok_or_else(|| PricingError::UnknownProduct(product.name().to_string()))?;

            debug!(product = %product, %quantity, %unit_price, "evaluating offer");

            match calculate_discount(offer, quantity, unit_price)? {
                Some(discount) => {
                    debug!(
                        product = %product,
                        description = discount.description(),
                        amount = %discount.amount(),
                        "applying discount"
                    );

                    receipt.add_discount(discount);
                }
                None => trace!(product = %product, %quantity, "offer does not apply"),
            }
        }

        Ok(())
    }

    /// Get the number of additions in the basket.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
