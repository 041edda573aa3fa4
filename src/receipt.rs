//! Receipt

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    discounts::Discount,
    pricing::{TotalPriceError, line_price, total_price},
    products::{Product, ProductUnit},
};

/// Errors that can occur when building or reading a receipt.
#[derive(Debug, Error, PartialEq)]
pub enum ReceiptError {
    /// Error calculating a line or total price.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// A line on the receipt, one per basket addition.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptItem<'a> {
    product: Product,
    quantity: Decimal,
    unit_price: Money<'a, Currency>,
    total_price: Money<'a, Currency>,
}

impl<'a> ReceiptItem<'a> {
    /// The product bought
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Quantity bought
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// Full price of the line, before any discounts
    pub fn total_price(&self) -> Money<'a, Currency> {
        self.total_price
    }
}

/// Final receipt for a priced basket.
///
/// Items are added first, then discounts; the receipt is only read afterwards.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    items: Vec<ReceiptItem<'a>>,
    discounts: SmallVec<[Discount<'a>; 4]>,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Create an empty receipt in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            discounts: SmallVec::new(),
            currency,
        }
    }

    /// Add a line for `quantity` of `product` at `unit_price`.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::Money`]: `unit_price` is not in the receipt's currency.
    /// - [`ReceiptError::TotalPrice`]: the line total cannot be represented.
    pub fn add_item(
        &mut self,
        product: Product,
        quantity: Decimal,
        unit_price: Money<'a, Currency>,
    ) -> Result<(), ReceiptError> {
        if unit_price.currency() != self.currency {
            return Err(ReceiptError::Money(MoneyError::CurrencyMismatch {
                expected: self.currency.iso_alpha_code,
                actual: unit_price.currency().iso_alpha_code,
            }));
        }

        let total_price = line_price(quantity, unit_price)?;

        self.items.push(ReceiptItem {
            product,
            quantity,
            unit_price,
            total_price,
        });

        Ok(())
    }

    /// Add a discount.
    pub fn add_discount(&mut self, discount: Discount<'a>) {
        self.discounts.push(discount);
    }

    /// Lines in the order they were added
    pub fn items(&self) -> &[ReceiptItem<'a>] {
        &self.items
    }

    /// Discounts in the order they were added
    pub fn discounts(&self) -> &[Discount<'a>] {
        &self.discounts
    }

    /// Currency used for all monetary values
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Total of all lines before discounts.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if there was a money arithmetic or currency mismatch error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, ReceiptError> {
        Ok(total_price(
            self.items.iter().map(ReceiptItem::total_price),
            self.currency,
        )?)
    }

    /// Total amount to pay: every line plus every (non-positive) discount.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if there was a money arithmetic or currency mismatch error.
    pub fn total_price(&self) -> Result<Money<'a, Currency>, ReceiptError> {
        let discounts = total_price(self.discounts.iter().map(Discount::amount), self.currency)?;

        Ok(self.subtotal()?.add(discounts)?)
    }

    /// Calculate the savings made by applying discounts.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if there was a money arithmetic or currency mismatch error.
    pub fn savings(&self) -> Result<Money<'a, Currency>, ReceiptError> {
        Ok(self.subtotal()?.sub(self.total_price()?)?)
    }

    /// Writes the receipt as a table, followed by the total.
    ///
    /// # Errors
    ///
    /// Returns an error if the totals cannot be calculated or the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Quantity", "Unit Price", "Price"]);

        for item in &self.items {
            builder.push_record([
                item.product.to_string(),
                present_quantity(item),
                item.unit_price.to_string(),
                item.total_price.to_string(),
            ]);
        }

        for discount in &self.discounts {
            builder.push_record([
                format!("{} ({})", discount.description(), discount.product()),
                String::new(),
                String::new(),
                discount.amount().to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Subtotal: {}", self.subtotal()?).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Savings:  {}", self.savings()?).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Total:    {}", self.total_price()?).map_err(|_err| ReceiptError::IO)
    }
}

/// Quantity as printed: as charged for products sold each, grams precision by weight.
fn present_quantity(item: &ReceiptItem<'_>) -> String {
    match item.product.unit() {
        ProductUnit::Each => item.quantity.normalize().to_string(),
        ProductUnit::Kilo => format!("{:.3}", item.quantity),
    }
}
