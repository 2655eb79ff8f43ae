//! View models handed to the rendering collaborator.

use serde::Serialize;

use crate::ids::ProductId;
use crate::money::Money;

pub const ADD_LABEL: &str = "Add to Cart";
pub const ADDED_LABEL: &str = "Added to Cart";
pub const EMPTY_CART_PLACEHOLDER: &str = "Your cart is empty.";
pub const NO_NUMBER_PLACEHOLDER: &str = "\u{2014}";
pub const NEWSLETTER_CONFIRMATION: &str = "Thanks for subscribing!";

/// Whether a product's add button reflects membership in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonState {
    Available,
    Added,
}

/// State of an add-to-cart button.
///
/// Every rendering of the same product (grid card, detail dialog) carries
/// an identical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddButton {
    pub product_id: ProductId,
    pub label: &'static str,
    pub enabled: bool,
    pub state: ButtonState,
}

/// Label and enabled state of a submit-style control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub label: &'static str,
    pub enabled: bool,
}

impl ControlState {
    pub fn idle(label: &'static str) -> Self {
        Self {
            label,
            enabled: true,
        }
    }

    pub fn busy(label: &'static str) -> Self {
        Self {
            label,
            enabled: false,
        }
    }
}

/// A product in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub product_id: ProductId,
    pub title: String,
    pub category: String,
    pub price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Money>,
    pub on_sale: bool,
    pub image: String,
    pub add_button: AddButton,
}

/// The open product detail dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product_id: ProductId,
    pub title: String,
    pub image: String,
    pub price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Money>,
    pub description: String,
    pub add_button: AddButton,
}

/// One cart panel row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartRow {
    /// Current position in the cart; valid only until the next mutation.
    pub index: usize,
    pub product_id: ProductId,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Cart panel contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartPanel {
    pub rows: Vec<CartRow>,
    pub total: Money,
    /// Set when the cart has no entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    pub checkout: ControlState,
}

impl CartPanel {
    pub fn is_empty(&self) -> bool {
        self.placeholder.is_some()
    }
}

/// Count shown on every cart badge.
///
/// One value so that the header badge and the floating badge can never
/// disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badges {
    /// Number of distinct cart entries.
    pub count: usize,
}

/// The open call picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallPickerView {
    /// Configured number as entered, or [`NO_NUMBER_PLACEHOLDER`].
    pub number_display: String,
}

/// Everything the page needs to draw the storefront.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopView {
    pub products: Vec<ProductCard>,
    pub cart: CartPanel,
    pub badges: Badges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ProductDetail>,
    pub contact_submit: ControlState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_picker: Option<CallPickerView>,
    /// Shown after a newsletter signup until it times out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter_confirmation: Option<&'static str>,
}

impl ShopView {
    /// All add buttons for a product across the grid and the detail dialog.
    pub fn add_buttons_for(&self, product_id: ProductId) -> Vec<AddButton> {
        self.products
            .iter()
            .map(|card| card.add_button)
            .chain(self.detail.iter().map(|d| d.add_button))
            .filter(|b| b.product_id == product_id)
            .collect()
    }
}
