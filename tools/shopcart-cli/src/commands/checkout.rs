//! Fill in the checkout form and place the order.

use anyhow::{bail, Context as _, Result};
use chrono::{DateTime, Utc};
use dialoguer::{Confirm, Input, Password};
use shopcart_commerce::checkout::{Checkout, CheckoutField, CheckoutForm, OrderConfirmation};

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::mask;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    if store.is_empty() {
        bail!("Your cart is empty. Add products before checking out.");
    }

    let interactive = !args.yes && !ctx.output.is_json();
    let clear_after = args.clear;

    let mut form = initial_form(args.form.as_deref(), ctx)?;
    apply_flags(&mut form, args);

    if interactive {
        ctx.output.header("Checkout");
        prompt_missing(&mut form)?;
        ctx.output.summary(&store.summary());
        review(&form, ctx);

        let confirmed = Confirm::new()
            .with_prompt("Place order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let mut checkout = Checkout::with_form(form);
    let confirmation = checkout.submit(&store)?.clone();

    if clear_after {
        store.clear();
    }

    report(&confirmation, ctx);
    Ok(())
}

fn initial_form(path: Option<&str>, ctx: &Context) -> Result<CheckoutForm> {
    let Some(path) = path else {
        return Ok(CheckoutForm::new());
    };
    let path = ctx.cwd.join(path);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read form: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse form: {}", path.display()))
}

fn apply_flags(form: &mut CheckoutForm, args: CheckoutArgs) {
    let flags = [
        (CheckoutField::FullName, args.full_name),
        (CheckoutField::Email, args.email),
        (CheckoutField::Address, args.address),
        (CheckoutField::City, args.city),
        (CheckoutField::ZipCode, args.zip_code),
        (CheckoutField::CardName, args.card_name),
        (CheckoutField::CardNumber, args.card_number),
        (CheckoutField::ExpMonth, args.exp_month),
        (CheckoutField::ExpYear, args.exp_year),
        (CheckoutField::Cvv, args.cvv),
    ];
    for (field, value) in flags {
        if let Some(value) = value {
            form.set(field, value);
        }
    }
}

fn prompt_missing(form: &mut CheckoutForm) -> Result<()> {
    for field in form.missing_fields() {
        let value = if field.is_sensitive() {
            Password::new().with_prompt(field.display_name()).interact()?
        } else {
            Input::<String>::new()
                .with_prompt(field.display_name())
                .interact_text()?
        };
        form.set(field, value);
    }
    Ok(())
}

fn review(form: &CheckoutForm, ctx: &Context) {
    ctx.output.info("");
    for field in CheckoutField::ALL {
        let value = form.get(field);
        let shown = match field {
            CheckoutField::CardNumber => mask(value),
            CheckoutField::Cvv => "*".repeat(value.chars().count()),
            _ => value.to_string(),
        };
        ctx.output.kv(field.display_name(), &shown);
    }
    ctx.output.info("");
}

fn report(confirmation: &OrderConfirmation, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(confirmation);
        return;
    }

    ctx.output.success("Order placed");
    ctx.output.kv("Order", confirmation.order_id.as_str());
    ctx.output.kv("Ship to", &confirmation.ship_to);
    ctx.output.kv("Total", &confirmation.summary.total.display());
    ctx.output.kv("Placed", &format_timestamp(confirmation.placed_at));
    ctx.output.info(&format!(
        "A confirmation will be sent to {}",
        confirmation.email
    ));
}

fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}
