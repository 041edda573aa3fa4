//! Checkout
//!
//! Prices a shopping basket into a receipt, applying per-product special
//! offers such as "3 for 2", "2 for £0.99" or "10% off".

pub mod basket;
pub mod catalog;
pub mod checkout;
pub mod discounts;
pub mod fixtures;
pub mod offers;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod utils;
