//! Discounts
//!
//! Evaluates a single product's offer against its aggregated quantity.
//!
//! Quantities are truncated toward zero for every threshold and bundle
//! calculation; only the full price of the goods uses the exact quantity.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    offers::{Offer, OfferKind},
    pricing::{TotalPriceError, minor_units, plain_amount, round_minor},
    products::Product,
};

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Discount arithmetic overflowed.
    #[error("discount calculation overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Errors bubbled up from price calculation.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// A discount granted on a product.
#[derive(Debug, Clone, PartialEq)]
pub struct Discount<'a> {
    product: Product,
    description: String,
    amount: Money<'a, Currency>,
}

impl<'a> Discount<'a> {
    /// Create a new discount. `amount` is the (negative) adjustment to the price.
    pub fn new(
        product: Product,
        description: impl Into<String>,
        amount: Money<'a, Currency>,
    ) -> Self {
        Self {
            product,
            description: description.into(),
            amount,
        }
    }

    /// The discounted product
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Human readable description, e.g. "3 for 2"
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Adjustment to the price; never positive
    pub fn amount(&self) -> Money<'a, Currency> {
        self.amount
    }
}

/// Calculate the discount `offer` grants on `quantity` units bought at `unit_price`.
///
/// Returns `Ok(None)` when the offer does not apply, e.g. when too few units
/// were bought to make up a bundle.
///
/// # Errors
///
/// Returns an error if:
/// - a bundle price is in a different currency to the unit price (`DiscountError::Money`).
/// - the calculation overflows (`DiscountError::Overflow`, `DiscountError::TotalPrice`).
pub fn calculate_discount<'a>(
    offer: &Offer<'a>,
    quantity: Decimal,
    unit_price: Money<'a, Currency>,
) -> Result<Option<Discount<'a>>, DiscountError> {
    let product = offer.product();

    match offer.kind() {
        OfferKind::ThreeForTwo => {
            let pair_price = minor_units(&unit_price)
                .checked_mul(Decimal::TWO)
                .ok_or(DiscountError::Overflow)?;

            bundle_discount(product, quantity, unit_price, 3, pair_price, "3 for 2")
        }
        OfferKind::TwoForAmount(amount) => {
            ensure_same_currency(amount, &unit_price)?;

            let description = format!("2 for {}", plain_amount(amount));

            bundle_discount(
                product,
                quantity,
                unit_price,
                2,
                minor_units(amount),
                description,
            )
        }
        OfferKind::FiveForAmount(amount) => {
            ensure_same_currency(amount, &unit_price)?;

            let description = format!("5 for {}", plain_amount(amount));

            bundle_discount(
                product,
                quantity,
                unit_price,
                5,
                minor_units(amount),
                description,
            )
        }
        OfferKind::PercentageOff(percent) => {
            percentage_discount(product, quantity, unit_price, *percent)
        }
    }
}

/// Discount from selling whole bundles of `bundle_size` units for `bundle_price` minor units.
///
/// Units left over after making up bundles are charged at full price.
fn bundle_discount<'a>(
    product: &Product,
    quantity: Decimal,
    unit_price: Money<'a, Currency>,
    bundle_size: u32,
    bundle_price: Decimal,
    description: impl Into<String>,
) -> Result<Option<Discount<'a>>, DiscountError> {
    let whole_units = quantity.trunc();
    let bundle_size = Decimal::from(bundle_size);

    if whole_units < bundle_size {
        return Ok(None);
    }

    let unit = minor_units(&unit_price);

    let bundles = whole_units
        .checked_div(bundle_size)
        .ok_or(DiscountError::Overflow)?
        .trunc();

    let remainder = whole_units
        .checked_rem(bundle_size)
        .ok_or(DiscountError::Overflow)?;

    let full_price = quantity.checked_mul(unit).ok_or(DiscountError::Overflow)?;

    let bundled_price = bundles
        .checked_mul(bundle_price)
        .zip(remainder.checked_mul(unit))
        .and_then(|(bundled, leftover)| bundled.checked_add(leftover))
        .ok_or(DiscountError::Overflow)?;

    let saving = full_price
        .checked_sub(bundled_price)
        .ok_or(DiscountError::Overflow)?;

    // A bundle dearer than buying the units singly is no discount at all.
    if saving < Decimal::ZERO {
        return Ok(None);
    }

    let saving = round_minor(saving)?;

    Ok(Some(Discount::new(
        product.clone(),
        description,
        Money::from_minor(-saving, unit_price.currency()),
    )))
}

/// Discount of `percent` off the full price. Applies to any quantity.
fn percentage_discount<'a>(
    product: &Product,
    quantity: Decimal,
    unit_price: Money<'a, Currency>,
    percent: Percentage,
) -> Result<Option<Discount<'a>>, DiscountError> {
    // decimal_percentage doesn't expose the underlying Decimal
    let fraction = percent * Decimal::ONE;

    // A negative percentage would be a surcharge.
    if fraction.is_sign_negative() {
        return Ok(None);
    }

    let saving = quantity
        .checked_mul(minor_units(&unit_price))
        .and_then(|full_price| full_price.checked_mul(fraction))
        .ok_or(DiscountError::Overflow)?;

    let percent_points = fraction
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(DiscountError::Overflow)?
        .normalize();

    let saving = round_minor(saving)?;

    Ok(Some(Discount::new(
        product.clone(),
        format!("{percent_points}% off"),
        Money::from_minor(-saving, unit_price.currency()),
    )))
}

/// Return `CurrencyMismatch` if `amount` isn't in the unit price's currency.
fn ensure_same_currency(
    amount: &Money<'_, Currency>,
    unit_price: &Money<'_, Currency>,
) -> Result<(), DiscountError> {
    if amount.currency() == unit_price.currency() {
        Ok(())
    } else {
        Err(DiscountError::Money(MoneyError::CurrencyMismatch {
            expected: unit_price.currency().iso_alpha_code,
            actual: amount.currency().iso_alpha_code,
        }))
    }
}
