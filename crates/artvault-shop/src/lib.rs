//! Catalog, cart and interaction core for the ArtVault storefront.
//!
//! - **Catalog**: immutable products loaded once from a manifest
//! - **Cart**: (product, quantity) entries with uniqueness and quantity bookkeeping
//! - **Search**: category filter, text search and stable price sorting
//! - **View**: pure projection of catalog + cart into renderable view models
//! - **Dispatch**: the `Storefront` root that routes user actions to the stores
//!
//! # Example
//!
//! ```rust,ignore
//! use artvault_shop::prelude::*;
//!
//! let mut shop = Storefront::builder(Catalog::sample())
//!     .page(page)
//!     .presenter(dialogs)
//!     .build();
//!
//! shop.dispatch(&"add-to-cart id=1".parse()?);
//! shop.dispatch(&"filter-changed category=anime sort=priceAsc".parse()?);
//! ```

pub mod ack;
pub mod config;
pub mod contact;
pub mod error;
pub mod ids;
pub mod money;
pub mod present;

pub mod cart;
pub mod catalog;
pub mod dispatch;
pub mod search;
pub mod view;

pub use error::ShopError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::ack::{AckKind, PendingAcks};
    pub use crate::config::ShopConfig;
    pub use crate::error::ShopError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{Cart, CartChange, CartEntry, CartPricing, LinePricing};
    pub use crate::catalog::{Catalog, CatalogManifest, Category, Product, ProductRecord};
    pub use crate::dispatch::{Action, Outcome, RawAction, Storefront, StorefrontBuilder};
    pub use crate::present::{
        Dialog, Navigation, Notice, OptionalPresenter, Page, PresentError, Presenter, Toast,
    };
    pub use crate::search::{project, CategoryFilter, FilterCriteria, SortMode};
    pub use crate::view::{
        AddButton, Badges, ButtonState, CallPickerView, CartPanel, CartRow, ControlState,
        ProductCard, ProductDetail, ShopView,
    };
}
