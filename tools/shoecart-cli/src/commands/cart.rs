//! Cart commands.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shoecart_commerce::cart::Cart;
use shoecart_store::CartError;

use super::{AmountArgs, Notified, ProductArgs};
use crate::context::Context;
use crate::output::fit;

const WIDTHS: [usize; 5] = [6, 36, 8, 12, 12];

/// Show the cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    print_cart(&store.cart(), ctx)
}

/// Add one unit of a product.
pub async fn add(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let result = store.add_product(args.product_id).await;
    finish(result, ctx)
}

/// Remove a product.
pub async fn remove(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    finish(store.remove_product(args.product_id), ctx)
}

/// Set a product's amount.
pub async fn update(args: AmountArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let result = store
        .update_product_amount(args.product_id, args.amount)
        .await;
    finish(result, ctx)
}

/// Empty the cart.
pub async fn clear(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    finish(store.clear_cart(), ctx)
}

/// Place the order.
pub async fn submit(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    finish(store.submit_order(), ctx)
}

/// The store has already notified the outcome; print the resulting cart or
/// hand the error back for the exit status.
fn finish(result: Result<Cart, CartError>, ctx: &Context) -> Result<()> {
    let cart = result.map_err(Notified)?;
    print_cart(&cart, ctx)
}

#[derive(Serialize)]
struct CartSummary<'a> {
    items: &'a Cart,
    count: u64,
    subtotal: f64,
    subtotal_display: String,
}

fn print_cart(cart: &Cart, ctx: &Context) -> Result<()> {
    let subtotal = cart.subtotal().context("Failed to total cart")?;

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            items: cart,
            count: cart.item_count(),
            subtotal: subtotal.to_decimal(),
            subtotal_display: subtotal.display(),
        });
        return Ok(());
    }

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    ctx.output.header("Cart");
    ctx.output
        .table_row(&["ID", "PRODUCT", "AMOUNT", "PRICE", "SUBTOTAL"], &WIDTHS);

    for item in cart {
        let id = item.id().to_string();
        let title = fit(&item.product.title, WIDTHS[1]);
        let amount = item.amount.to_string();
        let price = item.product.price.display();
        let total = item.total().context("Failed to total line")?.display();
        ctx.output
            .table_row(&[&id, &title, &amount, &price, &total], &WIDTHS);
    }

    ctx.output.info("");
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Total", &subtotal.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::already_notified;
    use crate::config::CliConfig;
    use crate::output::Output;
    use shoecart_commerce::ProductId;

    fn context() -> Context {
        Context {
            config: CliConfig::default(),
            output: Output::new(true),
            cwd: std::env::temp_dir(),
            catalog_file: None,
        }
    }

    #[test]
    fn test_failed_operation_is_not_reported_twice() {
        let err = finish(Err(CartError::ProductNotInCart(ProductId::new(3))), &context()).unwrap_err();
        assert!(already_notified(&err));
    }

    #[test]
    fn test_successful_operation_prints_cart() {
        assert!(finish(Ok(Cart::new()), &context()).is_ok());
    }
}
