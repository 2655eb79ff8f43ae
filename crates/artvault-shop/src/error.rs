//! Storefront error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur while loading or operating the storefront.
///
/// Referential misses (unknown product ids, stale cart indices) are not
/// errors; cart operations report them as [`crate::cart::CartChange::Unchanged`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShopError {
    /// Two manifest records share an id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(ProductId),

    /// A manifest record has a non-positive or unbounded price.
    #[error("Invalid price for product {product_id}: {price}")]
    InvalidPrice { product_id: ProductId, price: i64 },

    /// A manifest record has an empty title.
    #[error("Product {0} has an empty title")]
    EmptyTitle(ProductId),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// The phone number cannot be used for the requested hand-off.
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    /// A contact form field failed validation.
    #[error("Invalid contact form: {0}")]
    InvalidContactForm(String),
}
