//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError, ProductQuantity},
    catalog::{Catalog, InMemoryCatalog},
    checkout::{PricingError, Teller, check_out},
    discounts::{Discount, DiscountError, calculate_discount},
    fixtures::{Fixture, FixtureError},
    offers::{Offer, OfferKind, Offers},
    pricing::TotalPriceError,
    products::{Product, ProductUnit},
    receipt::{Receipt, ReceiptError, ReceiptItem},
};
