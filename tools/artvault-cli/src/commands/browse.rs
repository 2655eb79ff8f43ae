//! Print the catalog through the filter/sort pipeline.

use anyhow::Result;
use artvault_shop::cart::Cart;
use artvault_shop::search::{project, FilterCriteria};
use artvault_shop::view::{product_card, ProductCard};

use super::BrowseArgs;
use crate::context::Context;
use crate::terminal::print_grid;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.config.catalog()?;
    let criteria = FilterCriteria::from_controls(&args.category, &args.sort, &args.search);
    let cart = Cart::new();

    let cards: Vec<ProductCard> = project(&catalog, &criteria)
        .into_iter()
        .map(|product| product_card(&cart, product))
        .collect();

    ctx.logger
        .debug_builder("browse")
        .field("category", criteria.category.as_str())
        .field("sort", criteria.sort.as_str())
        .field_i64("matches", cards.len() as i64)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&cards);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} of {} products ({}, {})",
        cards.len(),
        catalog.len(),
        criteria.category.as_str(),
        criteria.sort.display_name()
    ));
    print_grid(&ctx.output, &cards);

    let categories: Vec<String> = catalog.categories().iter().map(|c| c.to_string()).collect();
    ctx.output.kv("categories", &categories.join(", "));

    Ok(())
}
