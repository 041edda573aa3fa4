//! Offer Fixtures

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    fixtures::{
        FixtureError,
        products::{parse_percentage, parse_price},
    },
    offers::{Offer, OfferKind},
    products::Product,
};

/// Offer fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfferFixture {
    /// Buy three, pay for two
    ThreeForTwo,

    /// Percentage off every unit
    PercentageOff {
        /// Percentage (e.g., "10%" or "0.1")
        percent: String,
    },

    /// Pairs for a fixed price
    TwoForAmount {
        /// Price of a pair (e.g., "0.99 GBP")
        price: String,
    },

    /// Five for a fixed price
    FiveForAmount {
        /// Price of five (e.g., "7.49 GBP")
        price: String,
    },
}

impl OfferFixture {
    /// Convert to an `Offer` on `product`, priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if a price or percentage is invalid, or if a bundle
    /// price is not in `currency`.
    pub fn try_into_offer(
        self,
        product: Product,
        currency: &'static Currency,
    ) -> Result<Offer<'static>, FixtureError> {
        let kind = match self {
            OfferFixture::ThreeForTwo => OfferKind::ThreeForTwo,
            OfferFixture::PercentageOff { percent } => {
                OfferKind::PercentageOff(parse_percentage(&percent)?)
            }
            OfferFixture::TwoForAmount { price } => {
                OfferKind::TwoForAmount(bundle_price(&price, currency)?)
            }
            OfferFixture::FiveForAmount { price } => {
                OfferKind::FiveForAmount(bundle_price(&price, currency)?)
            }
        };

        Ok(Offer::new(product, kind))
    }
}

fn bundle_price(
    price: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, price_currency) = parse_price(price)?;

    if price_currency != currency {
        return Err(FixtureError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            price_currency.iso_alpha_code.to_string(),
        ));
    }

    Ok(Money::from_minor(minor_units, currency))
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::products::ProductUnit;

    use super::*;

    fn toothbrush() -> Product {
        Product::new("toothbrush", ProductUnit::Each)
    }

    #[test]
    fn three_for_two_fixture_converts() -> TestResult {
        let fixture: OfferFixture = serde_norway::from_str("type: three_for_two\n")?;

        let offer = fixture.try_into_offer(toothbrush(), GBP)?;

        assert!(matches!(offer.kind(), OfferKind::ThreeForTwo));
        assert_eq!(offer.product(), &toothbrush());

        Ok(())
    }

    #[test]
    fn percentage_off_fixture_converts() -> TestResult {
        let fixture: OfferFixture =
            serde_norway::from_str("type: percentage_off\npercent: 10%\n")?;

        let offer = fixture.try_into_offer(toothbrush(), GBP)?;
        let expected = Percentage::try_from("0.1")?;

        assert!(matches!(
            offer.kind(),
            OfferKind::PercentageOff(percent) if *percent == expected
        ));

        Ok(())
    }

    #[test]
    fn bundle_fixtures_convert() -> TestResult {
        let two: OfferFixture =
            serde_norway::from_str("type: two_for_amount\nprice: 0.99 GBP\n")?;
        let five: OfferFixture =
            serde_norway::from_str("type: five_for_amount\nprice: 7.49 GBP\n")?;

        let two = two.try_into_offer(toothbrush(), GBP)?;
        let five = five.try_into_offer(toothbrush(), GBP)?;

        assert!(matches!(
            two.kind(),
            OfferKind::TwoForAmount(price) if price.to_minor_units() == 99
        ));
        assert!(matches!(
            five.kind(),
            OfferKind::FiveForAmount(price) if price.to_minor_units() == 749
        ));

        Ok(())
    }

    #[test]
    fn bundle_price_in_other_currency_errors() -> TestResult {
        let fixture: OfferFixture =
            serde_norway::from_str("type: two_for_amount\nprice: 0.99 USD\n")?;

        let result = fixture.try_into_offer(toothbrush(), GBP);

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn unknown_offer_type_fails_to_parse() {
        let result = serde_norway::from_str::<OfferFixture>("type: buy_one_get_one\n");

        assert!(result.is_err());
    }
}
