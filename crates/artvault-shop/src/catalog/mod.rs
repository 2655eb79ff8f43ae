//! Product catalog module.
//!
//! The catalog is loaded once from a static manifest and never mutated
//! during a session.

mod category;
mod manifest;
mod product;

pub use category::Category;
pub use manifest::{CatalogManifest, ProductRecord};
pub use product::{Catalog, Product};
