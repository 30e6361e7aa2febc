//! Shopping cart commands.

use anyhow::{Context as _, Result};
use cooling_commerce::cart::{CartEvent, CartLedger, CartLine};
use cooling_commerce::ids::ProductId;
use cooling_store::Store;
use dialoguer::Confirm;
use serde::Serialize;
use tracing::info;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let mut cart = CartLedger::load(store);
    cart.subscribe(|event: &CartEvent| info!(?event, "cart changed"));

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id } => {
            let loaded = ctx.require_catalog().await?;
            let product = loaded.catalog.require(ProductId::new(id))?;
            cart.add_item(product)
                .with_context(|| format!("Failed to add product #{}", id))?;
            ctx.output.success(&format!("{} added to cart", product.name));
        }
        CartCommand::Remove { id } => {
            cart.remove_item(ProductId::new(id))?;
            ctx.output.success(&format!("Product #{} removed", id));
        }
        CartCommand::Set { id, quantity } => {
            cart.update_quantity(ProductId::new(id), quantity)?;
        }
        CartCommand::Clear { yes } => {
            if cart.is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove every item from the cart?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.info("Cart left unchanged");
                    return Ok(());
                }
            }
            cart.clear()?;
            ctx.output.success("Cart cleared");
        }
    }

    show(&cart, ctx)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartReport<'a> {
    lines: &'a [CartLine],
    total_items: u64,
    total_price: String,
}

fn show<S: Store>(cart: &CartLedger<S>, ctx: &Context) -> Result<()> {
    let total_price = cart.total_price()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartReport {
            lines: cart.lines(),
            total_items: cart.total_items(),
            total_price: total_price.display(),
        });
        return Ok(());
    }

    ctx.output.header("Shopping Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    for line in cart.lines() {
        let id = format!("#{}", line.product_id);
        let quantity = format!("x{}", line.quantity);
        let total = line.line_total()?.display();
        ctx.output.table_row(
            &[&id, &line.name, &line.unit_price().display(), &quantity, &total],
            &[5, 36, 12, 6, 14],
        );
    }
    println!();
    ctx.output.kv("Items", &cart.total_items().to_string());
    ctx.output.kv("Total", &total_price.display());
    Ok(())
}
