//! Cart pricing derived from the catalog.

use serde::Serialize;

use crate::ids::ProductId;
use crate::money::Money;

/// Pricing for a single cart entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePricing {
    /// Position of the entry in the cart at the time of pricing.
    pub index: usize,
    pub product_id: ProductId,
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price * quantity.
    pub line_total: Money,
}

/// Pricing for the whole cart.
///
/// Entries whose product no longer resolves in the catalog are skipped, so
/// `lines` may be shorter than the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartPricing {
    pub lines: Vec<LinePricing>,
    pub total: Money,
}

impl CartPricing {
    pub fn line(&self, index: usize) -> Option<&LinePricing> {
        self.lines.iter().find(|l| l.index == index)
    }
}
