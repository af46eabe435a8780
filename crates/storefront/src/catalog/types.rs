//! Domain types for a product catalog snapshot.
//!
//! A snapshot is immutable once loaded. Option ordering is significant: it
//! defines the positional schema of every variant value vector.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vitrine_core::{Price, ProductId, VariantId};

/// A named axis of product variation (e.g. "Tamanho", "Cor").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option name; identity of the axis.
    pub name: String,
    /// Permitted values, in declaration order.
    pub values: Vec<String>,
}

impl ProductOption {
    /// Whether `value` is one of this option's permitted values.
    #[must_use]
    pub fn permits(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// One purchasable SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Upstream variant id, passed through to checkout.
    pub id: VariantId,
    /// Chosen values, one per option in catalog option order. This vector is
    /// the variant's identity key within a snapshot.
    pub values: Vec<String>,
    /// Unit price, non-negative.
    pub price: Price,
    /// Units in stock, never negative.
    pub inventory_quantity: i64,
    /// Variant-specific image, superseding the catalog base image.
    pub image_url: Option<String>,
}

impl Variant {
    /// Whether this variant has stock.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.inventory_quantity > 0
    }
}

/// Immutable in-memory representation of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Upstream product id.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Base product image.
    pub image_url: String,
    /// Option axes in declaration order.
    pub options: Vec<ProductOption>,
    /// Variants; value vectors are unique within the snapshot.
    pub variants: Vec<Variant>,
}

impl CatalogSnapshot {
    /// Option names in catalog order.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.name.as_str())
    }

    /// Find an option axis by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.name == name)
    }
}

/// Gallery image sets keyed by color value, supplied by the presentation
/// layer. Used as a secondary image-selection channel when the resolved
/// variant carries no image override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryImages {
    /// Image URLs per color value, first image shown on selection.
    pub by_color: HashMap<String, Vec<String>>,
}

impl GalleryImages {
    /// First gallery image for a color value, if any.
    #[must_use]
    pub fn first_for_color(&self, color: &str) -> Option<&str> {
        self.by_color
            .get(color)
            .and_then(|images| images.first())
            .map(String::as_str)
    }
}
