//! Interactive shopping prompt.

use std::time::Duration;

use anyhow::Result;
use artvault_shop::ack::AckKind;
use artvault_shop::dispatch::{Outcome, RawAction, Storefront};
use dialoguer::{Confirm, Input, Select};

use super::ShopArgs;
use crate::context::Context;

const MENU: [&str; 11] = [
    "Browse / filter",
    "View product",
    "Add to cart",
    "Increase quantity",
    "Decrease quantity",
    "Remove from cart",
    "Checkout",
    "Contact us",
    "Call us",
    "Subscribe to newsletter",
    "Quit",
];

const SORTS: [&str; 3] = ["default", "priceAsc", "priceDesc"];

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.storefront_builder()?.build();

    loop {
        settle_due(&mut shop).await;
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&MENU)
            .default(0)
            .interact()?;

        let action = match choice {
            0 => Some(filter_action(&shop)?),
            1 => pick_product(&shop, "Which product?")?
                .map(|id| RawAction::new("view-detail").with("id", id)),
            2 => pick_product(&shop, "Add which product?")?
                .map(|id| RawAction::new("add-to-cart").with("id", id)),
            3 => pick_entry(&shop, ctx)?.map(|idx| RawAction::new("increase-qty").with("idx", idx)),
            4 => pick_entry(&shop, ctx)?.map(|idx| RawAction::new("decrease-qty").with("idx", idx)),
            5 => pick_entry(&shop, ctx)?.map(|idx| RawAction::new("remove-entry").with("idx", idx)),
            6 => checkout_action(&shop, &args, ctx)?,
            7 => Some(contact_action()?),
            8 => Some(call_action()?),
            9 => Some(RawAction::new("subscribe-newsletter")),
            _ => break,
        };

        let Some(action) = action else {
            continue;
        };
        if shop.dispatch(&action) == Outcome::Ignored {
            ctx.output.debug(&format!("ignored {}", action));
        }
        settle_pending(&mut shop, ctx).await;
    }

    let cancelled = shop.dispose();
    if !cancelled.is_empty() {
        ctx.output.warn(&format!("{} acknowledgment(s) cancelled", cancelled.len()));
    }
    ctx.output.success("Thanks for visiting ArtVault");
    Ok(())
}

/// Apply acknowledgments that came due while the prompt was open.
async fn settle_due(shop: &mut Storefront) {
    while let Ok(Some(_)) = tokio::time::timeout(Duration::ZERO, shop.settle_next()).await {}
}

/// Block on in-flight acknowledgments the way a disabled button would.
async fn settle_pending(shop: &mut Storefront, ctx: &Context) {
    for (kind, label) in [
        (AckKind::Checkout, "Processing..."),
        (AckKind::ContactForm, "Sending..."),
    ] {
        if !shop.is_pending(kind) {
            continue;
        }
        let spinner = ctx.output.spinner(label);
        while shop.is_pending(kind) {
            if shop.settle_next().await.is_none() {
                break;
            }
        }
        spinner.finish_and_clear();
    }
}

fn filter_action(shop: &Storefront) -> Result<RawAction> {
    let mut categories = vec!["all".to_string()];
    categories.extend(shop.catalog().categories().iter().map(|c| c.to_string()));

    let category = Select::new()
        .with_prompt("Category")
        .items(&categories)
        .default(0)
        .interact()?;
    let sort = Select::new()
        .with_prompt("Sort by")
        .items(&SORTS)
        .default(0)
        .interact()?;
    let search: String = Input::new()
        .with_prompt("Search")
        .allow_empty(true)
        .interact_text()?;

    Ok(RawAction::new("filter-changed")
        .with("category", categories[category].as_str())
        .with("sort", SORTS[sort])
        .with("search", search))
}

fn pick_product(shop: &Storefront, prompt: &str) -> Result<Option<String>> {
    let view = shop.view()?;
    if view.products.is_empty() {
        return Ok(None);
    }
    let items: Vec<String> = view
        .products
        .iter()
        .map(|card| format!("{} ({}) {}", card.title, card.price.display(), card.add_button.label))
        .collect();

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(selection.map(|i| view.products[i].product_id.to_string()))
}

fn pick_entry(shop: &Storefront, ctx: &Context) -> Result<Option<String>> {
    let view = shop.view()?;
    if let Some(placeholder) = view.cart.placeholder {
        ctx.output.info(placeholder);
        return Ok(None);
    }
    let items: Vec<String> = view
        .cart
        .rows
        .iter()
        .map(|row| format!("{} x{} ({})", row.title, row.quantity, row.line_total.display()))
        .collect();

    let selection = Select::new()
        .with_prompt("Which cart line?")
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(selection.map(|i| view.cart.rows[i].index.to_string()))
}

fn checkout_action(shop: &Storefront, args: &ShopArgs, ctx: &Context) -> Result<Option<RawAction>> {
    let total = shop.view()?.cart.total;
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Check out {}?", total.display()))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(None);
        }
    }
    Ok(Some(RawAction::new("checkout")))
}

fn contact_action() -> Result<RawAction> {
    let mut action = RawAction::new("submit-contact");
    for field in ["name", "email", "message"] {
        let value: String = Input::new()
            .with_prompt(field)
            .allow_empty(true)
            .interact_text()?;
        action = action.with(field, value);
    }
    Ok(action)
}

fn call_action() -> Result<RawAction> {
    let options = ["Show call options", "Phone", "WhatsApp", "Close call options"];
    let tags = ["open-call-picker", "call-phone", "call-whatsapp", "close-call-picker"];
    let choice = Select::new()
        .with_prompt("Call us")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(RawAction::new(tags[choice]))
}
