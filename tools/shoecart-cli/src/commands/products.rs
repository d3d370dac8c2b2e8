//! Catalog listing.

use anyhow::{Context as _, Result};

use crate::context::Context;
use crate::output::fit;

/// Run the products command.
pub async fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let products = catalog
        .list_products()
        .await
        .context("Failed to list products")?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    if products.is_empty() {
        ctx.output.info("The catalog is empty.");
        return Ok(());
    }

    ctx.output.header("Products");
    ctx.output.table_row(&["ID", "TITLE", "PRICE"], &[6, 40, 12]);

    for product in &products {
        let id = product.id.to_string();
        let title = fit(&product.title, 40);
        let price = product.price.display();
        ctx.output.table_row(&[&id, &title, &price], &[6, 40, 12]);
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} product(s)", products.len()));

    Ok(())
}
