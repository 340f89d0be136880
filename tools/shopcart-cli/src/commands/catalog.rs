//! Browse the catalog snapshot.

use anyhow::{bail, Result};
use shopcart_commerce::catalog::{Catalog, CategoryFilter};
use shopcart_commerce::{Money, ProductId};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(args.file.as_deref())?;
    ctx.output.debug(&format!("Catalog has {} products", catalog.len()));

    match args.command {
        CatalogCommand::List { category } => list(&catalog, &category, ctx),
        CatalogCommand::Categories => categories(&catalog, ctx),
        CatalogCommand::Add { id } => add(&catalog, ProductId::new(id), ctx),
    }
}

fn list(catalog: &Catalog, category: &str, ctx: &Context) -> Result<()> {
    let filter: CategoryFilter = category.parse().unwrap_or_default();
    let products = catalog.filter(&filter);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    // Mark products already in the cart
    let store = ctx.open_store()?;
    let currency = store.currency();

    ctx.output.header(&format!("Products ({})", filter));

    if products.is_empty() {
        ctx.output.info(&format!("No products in category '{}'", filter));
        return Ok(());
    }

    let widths = [6, 40, 10, 5, 6];
    ctx.output.table_row(&["ID", "Title", "Price", "Rate", ""], &widths);
    for product in products {
        let id = product.id.to_string();
        let title = truncate(&product.title, 40);
        let price = Money::new(product.price, currency).display();
        let rate = format!("{:.1}", product.rating.rate);
        let badge = if store.contains(product.id) { "Added" } else { "" };
        ctx.output.table_row(&[&id, &title, &price, &rate, badge], &widths);
    }

    Ok(())
}

fn categories(catalog: &Catalog, ctx: &Context) -> Result<()> {
    let categories = catalog.categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    ctx.output.list_item(&CategoryFilter::All.to_string());
    for category in categories {
        let count = catalog.filter(&CategoryFilter::category(category)).len();
        ctx.output.list_item(&format!("{} ({})", category, count));
    }

    Ok(())
}

fn add(catalog: &Catalog, id: ProductId, ctx: &Context) -> Result<()> {
    let Some(product) = catalog.get(id) else {
        bail!("Product {} is not in the catalog", id);
    };

    let mut store = ctx.open_store()?;
    store.add_item(product.to_cart_line());

    let quantity = store.get(id).map(|line| line.quantity).unwrap_or_default();
    ctx.output.success(&format!("Added {} (now {} in cart)", product.title, quantity));

    super::cart::show(&store, ctx);
    Ok(())
}
