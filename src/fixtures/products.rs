//! Product Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Product, ProductUnit},
};

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// How the product is sold
    pub unit: ProductUnit,

    /// Unit price (e.g., "0.99 GBP")
    pub price: String,
}

impl From<&ProductFixture> for Product {
    fn from(fixture: &ProductFixture) -> Self {
        Product::new(fixture.name.clone(), fixture.unit)
    }
}

/// Parse a currency code (e.g., "GBP")
///
/// # Errors
///
/// Returns an error if the currency code is not recognized.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(currency_code)?;

    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "10%" or "0.1") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "10%" for 10%
/// - Decimal format: "0.1" for 10%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let fraction = if let Some(points) = trimmed.strip_suffix('%') {
        points
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|points| points.checked_div(Decimal::ONE_HUNDRED))
    } else {
        trimmed.parse::<Decimal>().ok()
    };

    let fraction = fraction
        .filter(|fraction| !fraction.is_sign_negative())
        .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))?;

    Percentage::try_from(fraction.normalize().to_string().as_str())
        .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))
}
