//! Variant resolution engine.
//!
//! Pure functions over a selection and a catalog snapshot. Resolution builds
//! the candidate key by projecting the selection in catalog option order and
//! searching for an exact positional vector match. Pricing may fall back to
//! the first catalog variant when a complete selection matches nothing
//! (degraded default so a price still renders); stock never uses that
//! fallback.

pub mod selection;

pub use selection::{SelectionError, SelectionModel};

use std::collections::BTreeMap;

use vitrine_core::Price;

use crate::catalog::{CatalogSnapshot, GalleryImages, Variant};

/// A user's in-progress choice of one value per option.
///
/// A key is absent until the user picks that axis. Stored values are always
/// permitted values of their option; [`SelectionModel`] enforces this.
pub type Selection = BTreeMap<String, String>;

// =============================================================================
// Resolution
// =============================================================================

/// Outcome of resolving a selection against a catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// Exact positional match on a variant's value vector.
    Matched(&'a Variant),

    /// Complete selection with no exact match (catalog data inconsistency).
    /// `fallback` is the first catalog variant, used for pricing only.
    Unmatched { fallback: Option<&'a Variant> },

    /// At least one option is unset; names are in catalog order.
    Incomplete(Vec<String>),
}

/// Stock status derived from a resolution.
///
/// Strictly exact-match based: the pricing fallback is never reported as
/// in stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Exact match with stock; carries the unit count.
    InStock(i64),
    /// Exact match, zero stock.
    OutOfStock,
    /// Complete selection, no exact match.
    Unavailable,
    /// Selection is missing these options (catalog order).
    Incomplete(Vec<String>),
}

impl Resolution<'_> {
    /// Price to render, from the matched variant or the degraded default.
    #[must_use]
    pub const fn price(&self) -> Option<Price> {
        match self {
            Self::Matched(variant) => Some(variant.price),
            Self::Unmatched { fallback: Some(variant) } => Some(variant.price),
            Self::Unmatched { fallback: None } | Self::Incomplete(_) => None,
        }
    }

    /// Stock status for this resolution.
    #[must_use]
    pub fn availability(&self) -> Availability {
        match self {
            Self::Matched(variant) if variant.in_stock() => {
                Availability::InStock(variant.inventory_quantity)
            }
            Self::Matched(_) => Availability::OutOfStock,
            Self::Unmatched { .. } => Availability::Unavailable,
            Self::Incomplete(missing) => Availability::Incomplete(missing.clone()),
        }
    }

    /// The exactly matched variant, if any.
    #[must_use]
    pub const fn exact(&self) -> Option<&Variant> {
        match self {
            Self::Matched(variant) => Some(variant),
            _ => None,
        }
    }
}

impl Availability {
    /// Whether an add-to-cart action should be enabled.
    #[must_use]
    pub const fn purchasable(&self) -> bool {
        matches!(self, Self::InStock(_))
    }

    /// Stock status message shown on the product page.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InStock(count) => format!("Em estoque ({count} unidades)"),
            Self::OutOfStock => "Fora de estoque".to_string(),
            Self::Unavailable => "Produto indisponível".to_string(),
            Self::Incomplete(missing) => format!(
                "Selecione {} para verificar disponibilidade",
                missing.join(", ")
            ),
        }
    }
}

/// Resolve a selection against a catalog snapshot.
///
/// Only catalog-declared option order matters for the candidate key; the
/// selection map's own ordering is irrelevant. Pure function, no side
/// effects.
#[must_use]
pub fn resolve<'a>(selection: &Selection, catalog: &'a CatalogSnapshot) -> Resolution<'a> {
    let mut key: Vec<&str> = Vec::with_capacity(catalog.options.len());
    let mut missing: Vec<String> = Vec::new();

    for option in &catalog.options {
        match selection.get(&option.name) {
            Some(value) => key.push(value.as_str()),
            None => missing.push(option.name.clone()),
        }
    }

    if !missing.is_empty() {
        return Resolution::Incomplete(missing);
    }

    let exact = catalog
        .variants
        .iter()
        .find(|variant| variant.values.iter().map(String::as_str).eq(key.iter().copied()));

    match exact {
        Some(variant) => Resolution::Matched(variant),
        None => Resolution::Unmatched {
            fallback: catalog.variants.first(),
        },
    }
}

// =============================================================================
// Image selection
// =============================================================================

/// Pick the product image to display.
///
/// Priority: resolved variant's image override, then the first gallery image
/// keyed by the selected color value, then the catalog base image. The color
/// axis is found by matching the option name against "cor"/"color"
/// case-insensitively.
#[must_use]
pub fn display_image<'a>(
    catalog: &'a CatalogSnapshot,
    resolution: &Resolution<'a>,
    selection: &Selection,
    gallery: &'a GalleryImages,
) -> &'a str {
    if let Resolution::Matched(variant) = resolution
        && let Some(url) = variant.image_url.as_deref()
    {
        return url;
    }

    if let Some(color) = selected_color(catalog, selection)
        && let Some(url) = gallery.first_for_color(color)
    {
        return url;
    }

    &catalog.image_url
}

/// The selected value of the color axis, if the catalog has one and it is
/// set.
#[must_use]
pub fn selected_color<'a>(catalog: &CatalogSnapshot, selection: &'a Selection) -> Option<&'a str> {
    let color_option = catalog.options.iter().find(|option| {
        let name = option.name.to_lowercase();
        name == "cor" || name == "color"
    })?;
    selection.get(&color_option.name).map(String::as_str)
}

/// Swatch hex code for a color name, used by the presentation layer.
#[must_use]
pub fn color_hex(name: &str) -> &'static str {
    match name {
        "Preto" => "#000000",
        "Branco" => "#FFFFFF",
        "Azul" => "#0066FF",
        "Vermelho" => "#FF0000",
        "Verde" => "#00A651",
        "Amarelo" => "#FFCC00",
        "Roxo" => "#8A2BE2",
        "Cinza" => "#919191",
        _ => "#CCCCCC",
    }
}
