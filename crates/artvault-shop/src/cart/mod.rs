//! Shopping cart module.
//!
//! Contains the cart store and its pricing.

mod cart;
mod pricing;

pub use cart::{Cart, CartChange, CartEntry, MAX_QUANTITY_PER_ENTRY};
pub use pricing::{CartPricing, LinePricing};
