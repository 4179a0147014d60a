//! Cart commands.

use std::sync::Arc;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use rocketshoes_cart::{CartStore, UpdateProductAmount};
use rocketshoes_commerce::{Currency, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::notify::OutputNotifier;
use crate::output::{format_money, format_price};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let notifier = Arc::new(OutputNotifier::new(ctx.output.clone()));
    let store = ctx.cart_store(notifier.clone())?;

    match args.command {
        CartCommand::Show => show_cart(&store, ctx).await,
        CartCommand::Add { product_id } => {
            let spinner = ctx.output.spinner(&format!("Adding product {}...", product_id));
            store.add_product(product_id).await;
            spinner.finish_and_clear();
            finish(&format!("Added product {}", product_id), &store, &notifier, ctx).await
        }
        CartCommand::Remove { product_id } => {
            store.remove_product(product_id).await;
            finish(&format!("Removed product {}", product_id), &store, &notifier, ctx).await
        }
        CartCommand::Update { product_id, amount } => {
            update_amount(product_id, amount, &store, &notifier, ctx).await
        }
        CartCommand::Clear { yes } => clear_cart(yes, &store, ctx).await,
    }
}

async fn update_amount(
    product_id: ProductId,
    amount: i64,
    store: &CartStore,
    notifier: &OutputNotifier,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner(&format!("Checking stock for product {}...", product_id));
    store
        .update_product_amount(UpdateProductAmount::new(product_id, amount))
        .await;
    spinner.finish_and_clear();

    finish(
        &format!("Product {} quantity set to {}", product_id, amount),
        store,
        notifier,
        ctx,
    )
    .await
}

async fn finish(
    message: &str,
    store: &CartStore,
    notifier: &OutputNotifier,
    ctx: &Context,
) -> Result<()> {
    if notifier.count() > 0 {
        bail!("Cart unchanged");
    }

    ctx.output.success(message);
    show_cart(store, ctx).await
}

async fn show_cart(store: &CartStore, ctx: &Context) -> Result<()> {
    let cart = store.cart().await;

    if ctx.output.is_json() {
        ctx.output.json(&cart);
        return Ok(());
    }

    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return Ok(());
    }

    let widths = [6, 40, 12, 5, 12];
    ctx.output
        .table_row(&["ID", "PRODUCT", "PRICE", "QTY", "SUBTOTAL"], &widths);

    for item in &cart {
        let id = item.id().to_string();
        let price = format_price(item.product.price);
        let amount = item.amount.to_string();
        let subtotal = format_money(item.subtotal(Currency::BRL).ok());
        ctx.output.table_row(
            &[
                id.as_str(),
                item.product.title.as_str(),
                price.as_str(),
                amount.as_str(),
                subtotal.as_str(),
            ],
            &widths,
        );
    }

    println!();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output
        .kv("total", &format_money(cart.total(Currency::BRL).ok()));

    Ok(())
}

async fn clear_cart(yes: bool, store: &CartStore, ctx: &Context) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Remove every product from the cart?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    store.clear().await?;
    ctx.output.success("Cart cleared");

    Ok(())
}
