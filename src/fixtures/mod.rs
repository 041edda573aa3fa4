//! Fixtures
//!
//! A pricing session described in YAML: the currency, the catalog, the
//! special offers in force and, optionally, a basket to price.
//!
//! ```yaml
//! currency: GBP
//! products:
//!   toothbrush: { name: toothbrush, unit: each, price: 0.99 GBP }
//!   apples: { name: apples, unit: kilo, price: 1.99 GBP }
//! offers:
//!   apples: { type: percentage_off, percent: 10% }
//! basket:
//!   - { product: apples, quantity: 2.5 }
//! ```

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    basket::{Basket, BasketError},
    catalog::InMemoryCatalog,
    checkout::Teller,
    fixtures::{
        offers::OfferFixture,
        products::{ProductFixture, parse_currency, parse_price},
    },
    offers::Offers,
    products::Product,
};

pub mod offers;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between the fixture and a price
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Basket creation error
    #[error("Failed to create basket: {0}")]
    Basket(#[from] BasketError),
}

/// Wrapper for a pricing session in YAML
#[derive(Debug, Deserialize)]
struct SessionFixture {
    currency: String,

    products: FxHashMap<String, ProductFixture>,

    #[serde(default)]
    offers: FxHashMap<String, OfferFixture>,

    #[serde(default)]
    basket: Vec<BasketItemFixture>,
}

/// A basket addition in YAML
#[derive(Debug, Deserialize)]
struct BasketItemFixture {
    product: String,

    quantity: Option<Decimal>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    currency: &'static Currency,
    products: FxHashMap<String, Product>,
    catalog: InMemoryCatalog<'static>,
    offers: Offers<'static>,
    basket: Basket,
}

impl Fixture {
    /// Load a fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Load a fixture from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed, a price or
    /// percentage is invalid, prices are in more than one currency, or
    /// an offer or basket item refers to an unknown product.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: SessionFixture = serde_norway::from_str(yaml)?;

        let currency = parse_currency(&fixture.currency)?;

        let mut products = FxHashMap::default();
        let mut catalog = InMemoryCatalog::new();

        for (key, product_fixture) in fixture.products {
            let (minor_units, price_currency) = parse_price(&product_fixture.price)?;

            if price_currency != currency {
                return Err(FixtureError::CurrencyMismatch(
                    currency.iso_alpha_code.to_string(),
                    price_currency.iso_alpha_code.to_string(),
                ));
            }

            let product = Product::from(&product_fixture);

            catalog.add_product(product.clone(), Money::from_minor(minor_units, currency));
            products.insert(key, product);
        }

        let mut offers = Offers::new();

        for (key, offer_fixture) in fixture.offers {
            let product = lookup_product(&products, &key)?.clone();

            offers.insert(offer_fixture.try_into_offer(product, currency)?);
        }

        let mut basket = Basket::new();

        for item in fixture.basket {
            let product = lookup_product(&products, &item.product)?.clone();

            basket.add_item_quantity(product, item.quantity.unwrap_or(Decimal::ONE))?;
        }

        Ok(Self {
            currency,
            products,
            catalog,
            offers,
            basket,
        })
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        lookup_product(&self.products, key)
    }

    /// Get the currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Get the catalog
    pub fn catalog(&self) -> &InMemoryCatalog<'static> {
        &self.catalog
    }

    /// Get the offers
    pub fn offers(&self) -> &Offers<'static> {
        &self.offers
    }

    /// Get the basket
    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// Create a teller holding the fixture's catalog and offers.
    pub fn teller(&self) -> Teller<'static, InMemoryCatalog<'static>> {
        Teller::with_offers(self.catalog.clone(), self.offers.clone(), self.currency)
    }
}

fn lookup_product<'f>(
    products: &'f FxHashMap<String, Product>,
    key: &str,
) -> Result<&'f Product, FixtureError> {
    products
        .get(key)
        .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::{catalog::Catalog, products::ProductUnit};

    use super::*;

    const SESSION: &str = "
currency: GBP
products:
  toothbrush: { name: toothbrush, unit: each, price: 0.99 GBP }
  apples: { name: apples, unit: kilo, price: 1.99 GBP }
offers:
  toothbrush: { type: three_for_two }
basket:
  - { product: toothbrush, quantity: 2 }
  - { product: apples, quantity: 0.5 }
  - { product: toothbrush }
";

    #[test]
    fn from_yaml_loads_catalog_offers_and_basket() -> TestResult {
        let fixture = Fixture::from_yaml(SESSION)?;

        let toothbrush = fixture.product("toothbrush")?;

        assert_eq!(fixture.currency(), GBP);
        assert_eq!(toothbrush, &Product::new("toothbrush", ProductUnit::Each));
        assert_eq!(fixture.catalog().len(), 2);
        assert_eq!(
            fixture.catalog().unit_price(toothbrush),
            Some(Money::from_minor(99, GBP))
        );
        assert!(fixture.offers().lookup(toothbrush).is_some());
        assert_eq!(fixture.basket().len(), 3);
        assert_eq!(fixture.basket().quantity_of(toothbrush), Decimal::from(3));

        Ok(())
    }

    #[test]
    fn teller_prices_the_basket() -> TestResult {
        let fixture = Fixture::from_yaml(SESSION)?;

        let receipt = fixture.teller().check_out(fixture.basket())?;

        // 3 toothbrushes for the price of 2, plus half a kilo of apples
        assert_eq!(receipt.total_price()?, Money::from_minor(198 + 100, GBP));

        Ok(())
    }

    #[test]
    fn product_not_found_returns_error() -> TestResult {
        let fixture = Fixture::from_yaml(SESSION)?;

        let result = fixture.product("nonexistent");

        assert!(matches!(result, Err(FixtureError::ProductNotFound(_))));

        Ok(())
    }

    #[test]
    fn offer_for_unknown_product_returns_error() {
        let result = Fixture::from_yaml(
            "
currency: GBP
products: {}
offers:
  rice: { type: three_for_two }
",
        );

        assert!(matches!(result, Err(FixtureError::ProductNotFound(key)) if key == "rice"));
    }

    #[test]
    fn price_in_other_currency_returns_error() {
        let result = Fixture::from_yaml(
            "
currency: GBP
products:
  rice: { name: rice, unit: each, price: 2.49 USD }
",
        );

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn non_positive_basket_quantity_returns_error() {
        let result = Fixture::from_yaml(
            "
currency: GBP
products:
  rice: { name: rice, unit: each, price: 2.49 GBP }
basket:
  - { product: rice, quantity: 0 }
",
        );

        assert!(matches!(
            result,
            Err(FixtureError::Basket(BasketError::InvalidQuantity(_, _)))
        ));
    }

    #[test]
    fn unknown_currency_returns_error() {
        let result = Fixture::from_yaml("currency: XYZ\nproducts: {}\n");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(_))));
    }
}
