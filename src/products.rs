//! Products

use std::fmt;

use serde::Deserialize;

/// How a product is sold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductUnit {
    /// Sold per unit, e.g. a toothbrush
    Each,

    /// Sold by weight, in kilograms
    Kilo,
}

/// Product
///
/// Two products are the same product when both their name and unit match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Product {
    name: String,
    unit: ProductUnit,
}

impl Product {
    /// Create a new product.
    pub fn new(name: impl Into<String>, unit: ProductUnit) -> Self {
        Self {
            name: name.into(),
            unit,
        }
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product unit of measure
    pub fn unit(&self) -> ProductUnit {
        self.unit
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
