//! Offers
//!
//! Special offers attached to individual products, and the registry that
//! holds at most one offer per product for a pricing session.

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};

use crate::products::Product;

/// The kinds of special offer a product can carry.
#[derive(Debug, Copy, Clone)]
pub enum OfferKind<'a> {
    /// Buy three, pay for two.
    ThreeForTwo,

    /// Take a percentage off the price of every unit (e.g. "10% off")
    PercentageOff(Percentage),

    /// Every pair costs a fixed amount (e.g. "2 for £0.99")
    TwoForAmount(Money<'a, Currency>),

    /// Every five units cost a fixed amount (e.g. "5 for £7.49")
    FiveForAmount(Money<'a, Currency>),
}

/// A special offer on a product.
#[derive(Debug, Clone)]
pub struct Offer<'a> {
    product: Product,
    kind: OfferKind<'a>,
}

impl<'a> Offer<'a> {
    /// Create a new offer of `kind` on `product`.
    pub fn new(product: Product, kind: OfferKind<'a>) -> Self {
        Self { product, kind }
    }

    /// Buy three of `product`, pay for two.
    pub fn three_for_two(product: Product) -> Self {
        Self::new(product, OfferKind::ThreeForTwo)
    }

    /// Take `percent` off every unit of `product`.
    pub fn percentage_off(product: Product, percent: Percentage) -> Self {
        Self::new(product, OfferKind::PercentageOff(percent))
    }

    /// Sell pairs of `product` for `amount`.
    pub fn two_for_amount(product: Product, amount: Money<'a, Currency>) -> Self {
        Self::new(product, OfferKind::TwoForAmount(amount))
    }

    /// Sell five of `product` for `amount`.
    pub fn five_for_amount(product: Product, amount: Money<'a, Currency>) -> Self {
        Self::new(product, OfferKind::FiveForAmount(amount))
    }

    /// The product this offer applies to
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The kind of offer
    pub fn kind(&self) -> &OfferKind<'a> {
        &self.kind
    }
}

/// Offer registry, keyed by product.
#[derive(Debug, Default, Clone)]
pub struct Offers<'a> {
    offers: FxHashMap<Product, Offer<'a>>,
}

impl<'a> Offers<'a> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            offers: FxHashMap::default(),
        }
    }

    /// Register an offer against its product.
    ///
    /// A product carries at most one offer, so this returns the offer that was
    /// replaced, if any.
    pub fn insert(&mut self, offer: Offer<'a>) -> Option<Offer<'a>> {
        self.offers.insert(offer.product.clone(), offer)
    }

    /// Look up the offer registered for `product`.
    pub fn lookup(&self, product: &Product) -> Option<&Offer<'a>> {
        self.offers.get(product)
    }

    /// Number of registered offers.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Check if no offers are registered.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl<'a> FromIterator<Offer<'a>> for Offers<'a> {
    fn from_iter<I: IntoIterator<Item = Offer<'a>>>(iter: I) -> Self {
        let mut offers = Offers::new();

        for offer in iter {
            offers.insert(offer);
        }

        offers
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;

    use crate::products::ProductUnit;

    use super::*;

    fn toothbrush() -> Product {
        Product::new("toothbrush", ProductUnit::Each)
    }

    #[test]
    fn lookup_returns_registered_offer() {
        let mut offers = Offers::new();

        offers.insert(Offer::three_for_two(toothbrush()));

        let offer = offers.lookup(&toothbrush());

        assert!(matches!(
            offer.map(Offer::kind),
            Some(OfferKind::ThreeForTwo)
        ));
    }

    #[test]
    fn lookup_without_offer_is_none() {
        let offers = Offers::new();

        assert!(offers.is_empty());
        assert!(offers.lookup(&toothbrush()).is_none());
    }

    #[test]
    fn insert_replaces_existing_offer_for_product() {
        let mut offers = Offers::new();

        let replaced = offers.insert(Offer::three_for_two(toothbrush()));
        assert!(replaced.is_none());

        let replaced = offers.insert(Offer::two_for_amount(
            toothbrush(),
            Money::from_minor(99, GBP),
        ));

        assert!(matches!(
            replaced.as_ref().map(Offer::kind),
            Some(OfferKind::ThreeForTwo)
        ));
        assert_eq!(offers.len(), 1);
        assert!(matches!(
            offers.lookup(&toothbrush()).map(Offer::kind),
            Some(OfferKind::TwoForAmount(_))
        ));
    }

    #[test]
    fn collects_from_iterator() {
        let apples = Product::new("apples", ProductUnit::Kilo);

        let offers: Offers<'_> = [
            Offer::three_for_two(toothbrush()),
            Offer::percentage_off(apples.clone(), Percentage::from(0.1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(offers.len(), 2);
        assert_eq!(
            offers.lookup(&apples).map(Offer::product),
            Some(&apples)
        );
    }
}
