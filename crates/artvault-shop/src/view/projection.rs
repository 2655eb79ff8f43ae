//! Projection of catalog and cart state into view models.

use crate::cart::Cart;
use crate::catalog::{Catalog, Product};
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::search::{project, FilterCriteria};
use crate::view::model::*;

/// Inputs for a full re-projection.
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs<'a> {
    pub catalog: &'a Catalog,
    pub cart: &'a Cart,
    pub criteria: &'a FilterCriteria,
    /// Product whose detail dialog is open.
    pub detail: Option<ProductId>,
    pub checkout_pending: bool,
    pub contact_pending: bool,
    pub newsletter_pending: bool,
    /// Configured contact number while the call picker is open.
    pub call_picker: Option<Option<&'a str>>,
}

/// Add-button state for a product, based solely on cart membership.
pub fn add_button(cart: &Cart, product_id: ProductId) -> AddButton {
    if cart.contains(product_id) {
        AddButton {
            product_id,
            label: ADDED_LABEL,
            enabled: false,
            state: ButtonState::Added,
        }
    } else {
        AddButton {
            product_id,
            label: ADD_LABEL,
            enabled: true,
            state: ButtonState::Available,
        }
    }
}

/// Grid card for a product.
pub fn product_card(cart: &Cart, product: &Product) -> ProductCard {
    ProductCard {
        product_id: product.id,
        title: product.title.clone(),
        category: product.category.to_string(),
        price: product.price,
        old_price: product.old_price,
        on_sale: product.is_on_sale(),
        image: product.image.clone(),
        add_button: add_button(cart, product.id),
    }
}

/// Detail dialog for a product.
pub fn product_detail(cart: &Cart, product: &Product) -> ProductDetail {
    ProductDetail {
        product_id: product.id,
        title: product.title.clone(),
        image: product.image.clone(),
        price: product.price,
        old_price: product.old_price,
        description: format!("Category: {} \u{2014} ID: {}", product.category, product.id),
        add_button: add_button(cart, product.id),
    }
}

/// Cart panel rows and total. Dangling entries are left out of both.
pub fn cart_panel(catalog: &Catalog, cart: &Cart, checkout_pending: bool) -> Result<CartPanel, ShopError> {
    let pricing = cart.pricing(catalog)?;

    let rows = pricing
        .lines
        .iter()
        .filter_map(|line| {
            catalog.get(line.product_id).map(|product| CartRow {
                index: line.index,
                product_id: line.product_id,
                title: product.title.clone(),
                image: product.image.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
            })
        })
        .collect();

    let checkout = if checkout_pending {
        ControlState::busy("Processing...")
    } else {
        ControlState::idle("Checkout")
    };

    Ok(CartPanel {
        rows,
        total: pricing.total,
        placeholder: cart.is_empty().then_some(EMPTY_CART_PLACEHOLDER),
        checkout,
    })
}

/// Call picker showing the configured number.
pub fn call_picker(contact_phone: Option<&str>) -> CallPickerView {
    let number = contact_phone.map(str::trim).unwrap_or_default();
    CallPickerView {
        number_display: if number.is_empty() {
            NO_NUMBER_PLACEHOLDER.to_string()
        } else {
            number.to_string()
        },
    }
}

/// Recompute the whole view from current state.
pub fn project_view(inputs: &ViewInputs<'_>) -> Result<ShopView, ShopError> {
    let products = project(inputs.catalog, inputs.criteria)
        .into_iter()
        .map(|p| product_card(inputs.cart, p))
        .collect();

    let detail = inputs
        .detail
        .and_then(|id| inputs.catalog.get(id))
        .map(|p| product_detail(inputs.cart, p));

    let contact_submit = if inputs.contact_pending {
        ControlState::busy("Sending...")
    } else {
        ControlState::idle("Send Message")
    };

    Ok(ShopView {
        products,
        cart: cart_panel(inputs.catalog, inputs.cart, inputs.checkout_pending)?,
        badges: Badges {
            count: inputs.cart.len(),
        },
        detail,
        contact_submit,
        call_picker: inputs.call_picker.map(call_picker),
        newsletter_confirmation: inputs.newsletter_pending.then_some(NEWSLETTER_CONFIRMATION),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SortMode;

    fn inputs<'a>(catalog: &'a Catalog, cart: &'a Cart, criteria: &'a FilterCriteria) -> ViewInputs<'a> {
        ViewInputs {
            catalog,
            cart,
            criteria,
            detail: None,
            checkout_pending: false,
            contact_pending: false,
            newsletter_pending: false,
            call_picker: None,
        }
    }

    #[test]
    fn test_empty_cart_view() {
        let catalog = Catalog::sample();
        let cart = Cart::new();
        let criteria = FilterCriteria::all();
        let view = project_view(&inputs(&catalog, &cart, &criteria)).unwrap();

        assert_eq!(view.products.len(), 6);
        assert!(view.cart.is_empty());
        assert_eq!(view.cart.placeholder, Some(EMPTY_CART_PLACEHOLDER));
        assert!(view.cart.total.is_zero());
        assert_eq!(view.badges.count, 0);
        assert!(view.products.iter().all(|c| c.add_button.enabled));
        assert_eq!(view.cart.checkout, ControlState::idle("Checkout"));
    }

    #[test]
    fn test_added_state_synchronized_across_grid_and_detail() {
        let catalog = Catalog::sample();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(2));
        let criteria = FilterCriteria::all();
        let mut inputs = inputs(&catalog, &cart, &criteria);
        inputs.detail = Some(ProductId::new(2));

        let view = project_view(&inputs).unwrap();
        let buttons = view.add_buttons_for(ProductId::new(2));
        assert_eq!(buttons.len(), 2);
        assert!(buttons.iter().all(|b| b.state == ButtonState::Added && !b.enabled));
        assert!(buttons.iter().all(|b| b.label == ADDED_LABEL));

        let other = view.add_buttons_for(ProductId::new(1));
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].label, ADD_LABEL);
    }

    #[test]
    fn test_badge_counts_entries_not_quantities() {
        let catalog = Catalog::sample();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(1));
        cart.add(&catalog, ProductId::new(1));
        cart.add(&catalog, ProductId::new(2));
        let criteria = FilterCriteria::all();

        let view = project_view(&inputs(&catalog, &cart, &criteria)).unwrap();
        assert_eq!(view.badges.count, 2);
        assert_eq!(view.cart.rows.len(), 2);
        assert_eq!(view.cart.rows[0].quantity, 2);
        assert_eq!(view.cart.rows[0].line_total.amount_minor, 2400);
        assert_eq!(view.cart.total.amount_minor, 3400);
    }

    #[test]
    fn test_filtered_grid_keeps_button_state() {
        let catalog = Catalog::sample();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(4));
        let criteria = FilterCriteria::from_controls("anime", "priceAsc", "");

        let view = project_view(&inputs(&catalog, &cart, &criteria)).unwrap();
        let ids: Vec<u64> = view.products.iter().map(|c| c.product_id.get()).collect();
        assert_eq!(ids, vec![5, 4]);
        assert_eq!(view.products[1].add_button.state, ButtonState::Added);
        assert_eq!(view.products[0].add_button.state, ButtonState::Available);
        assert_eq!(criteria.sort, SortMode::PriceAsc);
    }

    #[test]
    fn test_detail_description() {
        let catalog = Catalog::sample();
        let cart = Cart::new();
        let detail = product_detail(&cart, catalog.get(ProductId::new(4)).unwrap());
        assert_eq!(detail.description, "Category: anime \u{2014} ID: 4");
        assert_eq!(detail.add_button.label, ADD_LABEL);
    }

    #[test]
    fn test_pending_controls() {
        let catalog = Catalog::sample();
        let cart = Cart::new();
        let criteria = FilterCriteria::all();
        let mut inputs = inputs(&catalog, &cart, &criteria);
        inputs.checkout_pending = true;
        inputs.contact_pending = true;

        let view = project_view(&inputs).unwrap();
        assert!(!view.cart.checkout.enabled);
        assert_eq!(view.cart.checkout.label, "Processing...");
        assert!(!view.contact_submit.enabled);
        assert_eq!(view.contact_submit.label, "Sending...");
        assert_eq!(view.newsletter_confirmation, None);
    }

    #[test]
    fn test_call_picker_number_display() {
        assert_eq!(call_picker(Some("  +1 555 010 0199 ")).number_display, "+1 555 010 0199");
        assert_eq!(call_picker(Some("   ")).number_display, NO_NUMBER_PLACEHOLDER);
        assert_eq!(call_picker(None).number_display, "\u{2014}");

        let catalog = Catalog::sample();
        let cart = Cart::new();
        let criteria = FilterCriteria::all();
        let mut inputs = inputs(&catalog, &cart, &criteria);
        assert_eq!(project_view(&inputs).unwrap().call_picker, None);

        inputs.call_picker = Some(None);
        inputs.newsletter_pending = true;
        let view = project_view(&inputs).unwrap();
        assert_eq!(view.call_picker.unwrap().number_display, NO_NUMBER_PLACEHOLDER);
        assert_eq!(view.newsletter_confirmation, Some(NEWSLETTER_CONFIRMATION));
    }
}
