//! Terminal implementations of the storefront's page and dialog host.

use artvault_shop::present::{Dialog, Navigation, Notice, Page, PresentError, Presenter, Toast};
use artvault_shop::view::{CartPanel, ProductCard, ProductDetail, ShopView};

use crate::output::{button_badge, price_tag, Output};

const GRID_WIDTHS: [usize; 5] = [4, 20, 12, 10, 14];
const CART_WIDTHS: [usize; 5] = [4, 20, 5, 10, 10];

/// Prints every rendered view.
pub struct TerminalPage {
    output: Output,
    renders: usize,
}

impl TerminalPage {
    pub fn new(output: Output) -> Self {
        Self { output, renders: 0 }
    }
}

impl Page for TerminalPage {
    fn render(&mut self, view: &ShopView) {
        self.renders += 1;
        if self.output.is_json() {
            self.output.json(view);
            return;
        }
        self.output.header(&format!(
            "ArtVault (cart: {}) #{}",
            view.badges.count, self.renders
        ));
        print_grid(&self.output, &view.products);
        if let Some(detail) = &view.detail {
            print_detail(&self.output, detail);
        }
        print_cart(&self.output, &view.cart);
        if !view.contact_submit.enabled {
            self.output.kv("contact", view.contact_submit.label);
        }
        if let Some(picker) = &view.call_picker {
            self.output.kv("call", &picker.number_display);
        }
        if let Some(confirmation) = view.newsletter_confirmation {
            self.output.success(confirmation);
        }
    }

    fn pulse_badge(&mut self) {
        self.output.debug("cart badge pulse");
    }

    fn navigate(&mut self, target: &Navigation) {
        self.output.info(&format!("Opening {}", target.href()));
    }

    fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            self.output.warn(notice.message());
        } else {
            self.output.success(notice.message());
        }
    }
}

/// Dialog host that narrates what would open and close.
pub struct TerminalDialogs {
    output: Output,
}

impl TerminalDialogs {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Presenter for TerminalDialogs {
    fn show(&mut self, dialog: Dialog) -> Result<(), PresentError> {
        self.output.debug(&format!("dialog open: {}", dialog.as_str()));
        Ok(())
    }

    fn hide(&mut self, dialog: Dialog) -> Result<(), PresentError> {
        self.output.debug(&format!("dialog closed: {}", dialog.as_str()));
        Ok(())
    }

    fn show_toast(&mut self, toast: Toast) -> Result<(), PresentError> {
        self.output.success(toast.message());
        Ok(())
    }
}

/// Print product cards as a table.
pub fn print_grid(output: &Output, cards: &[ProductCard]) {
    if cards.is_empty() {
        output.info("No products match.");
        return;
    }
    output.table_row(&["ID", "Title", "Category", "Price", "Was"], &GRID_WIDTHS);
    for card in cards {
        let id = card.product_id.to_string();
        let price = card.price.display();
        let was = card.old_price.map(|m| m.display()).unwrap_or_default();
        output.table_row(
            &[id.as_str(), card.title.as_str(), card.category.as_str(), price.as_str(), was.as_str()],
            &GRID_WIDTHS,
        );
        output.debug(&format!(
            "{} {}",
            card.product_id,
            button_badge(card.add_button.label, card.add_button.enabled)
        ));
    }
}

fn print_detail(output: &Output, detail: &ProductDetail) {
    output.info(&format!(
        "{}  {}  {}",
        detail.title,
        price_tag(&detail.price, detail.old_price.as_ref()),
        button_badge(detail.add_button.label, detail.add_button.enabled)
    ));
    output.kv("about", &detail.description);
}

fn print_cart(output: &Output, cart: &CartPanel) {
    if let Some(placeholder) = cart.placeholder {
        output.kv("cart", placeholder);
        return;
    }
    output.table_row(&["Idx", "Title", "Qty", "Unit", "Line"], &CART_WIDTHS);
    for row in &cart.rows {
        let index = row.index.to_string();
        let quantity = row.quantity.to_string();
        let unit = row.unit_price.display();
        let line = row.line_total.display();
        output.table_row(
            &[index.as_str(), row.title.as_str(), quantity.as_str(), unit.as_str(), line.as_str()],
            &CART_WIDTHS,
        );
    }
    output.kv("total", &cart.total.display());
    output.kv("checkout", &button_badge(cart.checkout.label, cart.checkout.enabled));
}
