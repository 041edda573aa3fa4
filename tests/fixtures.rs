//! Integration tests for YAML pricing sessions.
//!
//! `fixtures/supermarket.yml` exercises every offer type:
//!
//! | Line                      | Price  | Discount              |
//! |---------------------------|--------|-----------------------|
//! | 2 x toothbrush @ £0.99    | £1.98  |                       |
//! | 2.5kg apples @ £1.99/kg   | £4.98  | 20% off: -£1.00       |
//! | 1 x rice @ £2.49          | £2.49  | 10% off: -£0.25       |
//! | 2 x cherry tomatoes @ 69p | £1.38  | 2 for 0.99: -£0.39    |
//! | 5 x toothpaste @ £1.79    | £8.95  | 5 for 7.49: -£1.46    |
//! | 1 x toothbrush @ £0.99    | £0.99  | 3 for 2: -£0.99       |
//!
//! Subtotal £20.77, savings £4.09, total £16.68.

use std::fs;

use rusty_money::{Money, iso::GBP};
use testresult::TestResult;

use checkout::fixtures::{Fixture, FixtureError};

#[test]
fn supermarket_fixture_prices_every_offer() -> TestResult {
    let fixture = Fixture::from_path("fixtures/supermarket.yml")?;

    let receipt = fixture.teller().check_out(fixture.basket())?;

    assert_eq!(receipt.items().len(), 6);
    assert_eq!(receipt.discounts().len(), 5);
    assert_eq!(receipt.subtotal()?, Money::from_minor(2077, GBP));
    assert_eq!(receipt.savings()?, Money::from_minor(409, GBP));
    assert_eq!(receipt.total_price()?, Money::from_minor(1668, GBP));

    Ok(())
}

#[test]
fn supermarket_fixture_renders_receipt() -> TestResult {
    let fixture = Fixture::from_path("fixtures/supermarket.yml")?;

    let receipt = fixture.teller().check_out(fixture.basket())?;

    let mut out = Vec::new();
    receipt.write_to(&mut out)?;

    let rendered = String::from_utf8(out)?;

    for expected in [
        "cherry tomato box",
        "2.500",
        "3 for 2 (toothbrush)",
        "20% off (apples)",
        "2 for 0.99 (cherry tomato box)",
        "5 for 7.49 (toothpaste)",
    ] {
        assert!(rendered.contains(expected), "missing {expected:?} in\n{rendered}");
    }

    Ok(())
}

#[test]
fn fixture_from_temporary_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.yml");

    fs::write(
        &path,
        "currency: EUR\nproducts:\n  bread: { name: bread, unit: each, price: 1.20 EUR }\nbasket:\n  - { product: bread, quantity: 2 }\n",
    )?;

    let fixture = Fixture::from_path(&path)?;
    let receipt = fixture.teller().check_out(fixture.basket())?;

    assert!(fixture.offers().is_empty());
    assert_eq!(
        receipt.total_price()?,
        Money::from_minor(240, rusty_money::iso::EUR)
    );

    Ok(())
}

#[test]
fn missing_fixture_file_returns_io_error() -> TestResult {
    let dir = tempfile::tempdir()?;

    let result = Fixture::from_path(dir.path().join("missing.yml"));

    assert!(matches!(result, Err(FixtureError::Io(_))));

    Ok(())
}

#[test]
fn malformed_fixture_returns_yaml_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.yml");

    fs::write(&path, "currency: GBP\nproducts: [not, a, map]\n")?;

    let result = Fixture::from_path(&path);

    assert!(matches!(result, Err(FixtureError::Yaml(_))));

    Ok(())
}

#[test]
fn unknown_offer_type_returns_yaml_error() {
    let result = Fixture::from_yaml(
        "
currency: GBP
products:
  rice: { name: rice, unit: each, price: 2.49 GBP }
offers:
  rice: { type: buy_one_get_one_free }
",
    );

    assert!(matches!(result, Err(FixtureError::Yaml(_))));
}
