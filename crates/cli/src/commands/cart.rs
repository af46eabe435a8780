//! File-backed cart commands.
//!
//! Every command loads the cart from the JSON file at `VITRINE_CART_PATH`,
//! applies one mutation, and lets the aggregator persist the result.

use thiserror::Error;
use vitrine_core::{Price, ProductId};
use vitrine_storefront::cart::{CartAggregator, CartLine, LineKey};
use vitrine_storefront::catalog::{CatalogClient, CatalogError, CatalogSnapshot};
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::store::FileStore;
use vitrine_storefront::variant::{self, Resolution, Selection};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Catalog fetch failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The product has no axis matching a given flag.
    #[error("product has no {0} option")]
    NoSuchAxis(&'static str),

    /// The selection does not identify a purchasable variant.
    #[error("cannot add to cart: {0}")]
    NotPurchasable(String),

    /// No cart line matches the given identity.
    #[error("no cart line for product {0} with that size/color")]
    LineNotFound(ProductId),
}

fn open_cart(config: &StorefrontConfig) -> CartAggregator<FileStore> {
    CartAggregator::load(FileStore::new(&config.cart_path))
}

fn line_key(product: i64, size: Option<String>, color: Option<String>) -> LineKey {
    LineKey {
        product_id: ProductId::new(product),
        size,
        color,
    }
}

/// Map the size/color flags onto the catalog's option axes.
fn build_selection(
    snapshot: &CatalogSnapshot,
    size: Option<&str>,
    color: Option<&str>,
) -> Result<Selection, CartError> {
    let axis = |names: [&str; 2], flag: &'static str| {
        snapshot
            .options
            .iter()
            .find(|option| names.contains(&option.name.to_lowercase().as_str()))
            .map(|option| option.name.clone())
            .ok_or(CartError::NoSuchAxis(flag))
    };

    let mut selection = Selection::new();
    if let Some(value) = size {
        selection.insert(axis(["tamanho", "size"], "size")?, value.to_owned());
    }
    if let Some(value) = color {
        selection.insert(axis(["cor", "color"], "color")?, value.to_owned());
    }
    Ok(selection)
}

/// Print the cart lines and subtotal.
#[allow(clippy::print_stdout)]
pub fn list(config: &StorefrontConfig) -> Result<(), CartError> {
    let cart = open_cart(config);

    if cart.lines().is_empty() {
        println!("cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        let axes: Vec<&str> = [line.size.as_deref(), line.color.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        println!(
            "  {} x{} [{}] {} - {}",
            line.title,
            line.quantity,
            axes.join(" / "),
            line.unit_price.display(),
            Price::brl(line.line_total()).display(),
        );
    }

    println!(
        "  {} item(s), subtotal {}",
        cart.total_count(),
        Price::brl(cart.subtotal()).display()
    );
    Ok(())
}

/// Resolve the selection against the live catalog and add the variant.
#[allow(clippy::print_stdout)]
pub async fn add(
    config: &StorefrontConfig,
    product: i64,
    size: Option<String>,
    color: Option<String>,
    quantity: u32,
) -> Result<(), CartError> {
    let client = CatalogClient::new(&config.catalog_base_url);
    let snapshot = client.product(ProductId::new(product)).await?;

    let selection = build_selection(&snapshot, size.as_deref(), color.as_deref())?;
    let resolution = variant::resolve(&selection, &snapshot);

    let Resolution::Matched(matched) = &resolution else {
        return Err(CartError::NotPurchasable(
            resolution.availability().message(),
        ));
    };
    if !matched.in_stock() {
        return Err(CartError::NotPurchasable(
            resolution.availability().message(),
        ));
    }

    let mut cart = open_cart(config);
    cart.add(CartLine {
        product_id: snapshot.id,
        size,
        color,
        title: snapshot.title.clone(),
        image_url: matched.image_url.clone().or_else(|| Some(snapshot.image_url.clone())),
        unit_price: matched.price,
        quantity,
    });

    println!("added; cart now holds {} item(s)", cart.total_count());
    Ok(())
}

/// Remove a line by identity.
#[allow(clippy::print_stdout)]
pub fn remove(
    config: &StorefrontConfig,
    product: i64,
    size: Option<String>,
    color: Option<String>,
) -> Result<(), CartError> {
    let mut cart = open_cart(config);
    let key = line_key(product, size, color);

    if !cart.lines().iter().any(|line| line.key() == key) {
        return Err(CartError::LineNotFound(key.product_id));
    }

    cart.remove(&key);
    println!("removed; cart now holds {} item(s)", cart.total_count());
    Ok(())
}

/// Overwrite a line's quantity.
#[allow(clippy::print_stdout)]
pub fn set_quantity(
    config: &StorefrontConfig,
    product: i64,
    size: Option<String>,
    color: Option<String>,
    quantity: u32,
) -> Result<(), CartError> {
    let mut cart = open_cart(config);
    let key = line_key(product, size, color);

    if !cart.lines().iter().any(|line| line.key() == key) {
        return Err(CartError::LineNotFound(key.product_id));
    }

    cart.set_quantity(&key, quantity);
    println!("cart now holds {} item(s)", cart.total_count());
    Ok(())
}

/// Empty the cart.
#[allow(clippy::print_stdout)]
pub fn clear(config: &StorefrontConfig) -> Result<(), CartError> {
    let mut cart = open_cart(config);
    cart.clear();
    println!("cart cleared");
    Ok(())
}
