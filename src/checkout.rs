//! Checkout
//!
//! Runs a full pricing pass over a basket: one receipt line per addition at
//! catalog price, followed by the discounts earned from special offers.

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{Span, info};

use crate::{
    basket::Basket,
    catalog::Catalog,
    discounts::DiscountError,
    offers::{Offer, Offers},
    receipt::{Receipt, ReceiptError},
};

/// Errors that can occur while pricing a basket.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The catalog has no price for the product (product name).
    #[error("no price for product: {0}")]
    UnknownProduct(String),

    /// Discount calculation error.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Receipt construction error.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// Price `basket` against `catalog`, applying `offers`, and return the receipt.
///
/// # Errors
///
/// - [`PricingError::UnknownProduct`]: the catalog cannot price a product in the basket.
/// - [`PricingError::Receipt`]: a price is in a currency other than `currency`.
/// - [`PricingError::Discount`]: a discount could not be calculated.
#[tracing::instrument(
    name = "checkout.check_out",
    skip_all,
    fields(
        lines = basket.len(),
        offers = offers.len(),
        currency = currency.iso_alpha_code,
        discounts = tracing::field::Empty
    ),
    err
)]
pub fn check_out<'a>(
    basket: &Basket,
    offers: &Offers<'a>,
    catalog: &impl Catalog<'a>,
    currency: &'static Currency,
) -> Result<Receipt<'a>, PricingError> {
    let mut receipt = Receipt::new(currency);

    for item in basket.items() {
        let unit_price = catalog
            .unit_price(item.product())
            .ok_or_else(|| PricingError::UnknownProduct(item.product().name().to_string()))?;

        receipt.add_item(item.product().clone(), item.quantity(), unit_price)?;
    }

    basket.handle_offers(&mut receipt, offers, catalog)?;

    let total = receipt.total_price()?;

    Span::current().record("discounts", receipt.discounts().len());

    info!(%total, "basket priced");

    Ok(receipt)
}

/// Prices baskets against a catalog and the special offers it has been given.
#[derive(Debug)]
pub struct Teller<'a, C> {
    catalog: C,
    offers: Offers<'a>,
    currency: &'static Currency,
}

impl<'a, C: Catalog<'a>> Teller<'a, C> {
    /// Create a teller pricing in `currency`, with no special offers.
    pub fn new(catalog: C, currency: &'static Currency) -> Self {
        Self {
            catalog,
            offers: Offers::new(),
            currency,
        }
    }

    /// Create a teller with an existing set of offers.
    pub fn with_offers(catalog: C, offers: Offers<'a>, currency: &'static Currency) -> Self {
        Self {
            catalog,
            offers,
            currency,
        }
    }

    /// Add a special offer, replacing any existing offer on the same product.
    pub fn add_special_offer(&mut self, offer: Offer<'a>) {
        self.offers.insert(offer);
    }

    /// The special offers in force
    pub fn offers(&self) -> &Offers<'a> {
        &self.offers
    }

    /// The catalog prices are taken from
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Price the contents of `basket`.
    ///
    /// # Errors
    ///
    /// See [`check_out`].
    pub fn check_out(&self, basket: &Basket) -> Result<Receipt<'a>, PricingError> {
        check_out(basket, &self.offers, &self.catalog, self.currency)
    }
}
