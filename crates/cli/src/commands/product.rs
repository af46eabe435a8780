//! Catalog inspection commands.

use vitrine_core::ProductId;
use vitrine_storefront::catalog::{CatalogClient, CatalogError};
use vitrine_storefront::config::StorefrontConfig;

/// Fetch a product and print its options and variants.
#[allow(clippy::print_stdout)]
pub async fn show(config: &StorefrontConfig, id: i64) -> Result<(), CatalogError> {
    let client = CatalogClient::new(&config.catalog_base_url);
    let snapshot = client.product(ProductId::new(id)).await?;

    println!("{} (#{})", snapshot.title, snapshot.id);
    println!("  image: {}", snapshot.image_url);

    for option in &snapshot.options {
        println!("  {}: {}", option.name, option.values.join(", "));
    }

    println!("  variants:");
    for variant in &snapshot.variants {
        let stock = if variant.in_stock() {
            format!("{} in stock", variant.inventory_quantity)
        } else {
            "out of stock".to_string()
        };
        println!(
            "    [{}] {} - {} ({stock})",
            variant.id,
            variant.values.join(" / "),
            variant.price.display(),
        );
    }

    Ok(())
}
