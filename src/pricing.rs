//! Prices
//!
//! Money is held in whole minor units. Quantities can be fractional, so
//! intermediate amounts are computed as [`Decimal`] minor units and rounded
//! back with [`RoundingStrategy::MidpointAwayFromZero`].

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// An amount could not be represented in minor units.
    #[error("price overflowed or could not be represented in minor units")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Round a decimal amount of minor units to a whole number of minor units.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the rounded amount does not fit in an `i64`.
pub fn round_minor(amount: Decimal) -> Result<i64, TotalPriceError> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(TotalPriceError::Overflow)
}

/// The minor units of a price, as a decimal.
pub fn minor_units(price: &Money<'_, Currency>) -> Decimal {
    Decimal::from(price.to_minor_units())
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the result cannot be represented.
pub fn line_price<'a>(
    quantity: Decimal,
    unit_price: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let total = quantity
        .checked_mul(minor_units(&unit_price))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(round_minor(total)?, unit_price.currency()))
}

/// Sum a set of prices, all of which must be in `currency`.
///
/// # Errors
///
/// Returns [`TotalPriceError::Money`] on a currency mismatch.
pub fn total_price<'a>(
    prices: impl IntoIterator<Item = Money<'a, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let total = prices
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, price| acc.add(price))?;

    Ok(total)
}

/// Plain decimal rendering of a price, without currency symbol (e.g. `6.25`, `3`).
pub fn plain_amount(price: &Money<'_, Currency>) -> Decimal {
    Decimal::new(price.to_minor_units(), price.currency().exponent).normalize()
}
