//! Show and edit the cart.

use std::str::FromStr;

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use rust_decimal::Decimal;
use shopcart_commerce::cart::NewCartLine;
use shopcart_commerce::store::CartPersistence;
use shopcart_commerce::{CartStore, Money, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add {
            id,
            title,
            price,
            image,
        } => {
            let unit_price = Decimal::from_str(price.trim())
                .with_context(|| format!("Invalid price: {}", price))?;
            let product_id = ProductId::new(id);
            store.add_item(NewCartLine::new(product_id, title, unit_price, image));
            report_line(&store, product_id, ctx);
        }
        CartCommand::Remove { id } => {
            let product_id = ProductId::new(id);
            if !store.contains(product_id) {
                ctx.output.warn(&format!("Product {} is not in the cart", product_id));
            }
            store.remove_item(product_id);
        }
        CartCommand::Set { id, quantity } => {
            let product_id = ProductId::new(id);
            if !store.contains(product_id) {
                ctx.output.warn(&format!("Product {} is not in the cart", product_id));
            }
            store.set_quantity(product_id, quantity);
            report_line(&store, product_id, ctx);
        }
        CartCommand::Clear { yes } => {
            if !store.is_empty() && !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} item(s) from the cart?", store.item_count()))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.warn("Cart left unchanged");
                    return Ok(());
                }
            }
            store.clear();
            ctx.output.success("Cart cleared");
        }
    }

    show(&store, ctx);
    Ok(())
}

fn report_line<P: CartPersistence>(store: &CartStore<P>, product_id: ProductId, ctx: &Context) {
    match store.get(product_id) {
        Some(line) => ctx.output.success(&format!("{} × {}", line.quantity, line.title)),
        None => ctx.output.info(&format!("Product {} is not in the cart", product_id)),
    }
}

/// Print the cart, or its summary as JSON.
pub fn show<P: CartPersistence>(store: &CartStore<P>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": store.lines(),
            "summary": store.summary(),
        }));
        return;
    }

    ctx.output.header("Cart");

    if store.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [6, 32, 10, 5, 10];
    ctx.output.table_row(&["ID", "Title", "Price", "Qty", "Total"], &widths);
    let currency = store.currency();
    for line in store.lines() {
        let id = line.product_id.to_string();
        let title = truncate(&line.title, 32);
        let unit = Money::new(line.unit_price, currency).display();
        let quantity = line.quantity.to_string();
        let total = Money::new(line.line_total(), currency).display();
        ctx.output.table_row(&[&id, &title, &unit, &quantity, &total], &widths);
        if !line.image_ref.is_empty() {
            ctx.output.debug(&line.image_ref);
        }
    }

    ctx.output.summary(&store.summary());
}
