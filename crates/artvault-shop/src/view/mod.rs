//! View projection.
//!
//! Stateless derivation of everything the page shows from the catalog, the
//! cart and the current filter criteria. Always a full recompute.

mod model;
mod projection;

pub use model::{
    AddButton, Badges, ButtonState, CallPickerView, CartPanel, CartRow, ControlState, ProductCard,
    ProductDetail, ShopView, ADDED_LABEL, ADD_LABEL, EMPTY_CART_PLACEHOLDER,
    NEWSLETTER_CONFIRMATION, NO_NUMBER_PLACEHOLDER,
};
pub use projection::{
    add_button, call_picker, cart_panel, product_card, product_detail, project_view, ViewInputs,
};
